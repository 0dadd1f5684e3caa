//! Mapping between contract models and REST DTOs

use super::dto::{PageDto, PageMetadataDto, SortOrderDto};
use crate::contract::{Order, Page, Sort};

impl<T> From<&Page<T>> for PageMetadataDto {
    fn from(page: &Page<T>) -> Self {
        Self {
            size: page.size(),
            number: page.number(),
            total_elements: page.total_elements(),
            total_pages: page.total_pages(),
            sort: sort_to_dto(page.pageable().sort()),
        }
    }
}

impl<T> From<Page<T>> for PageDto<T> {
    fn from(page: Page<T>) -> Self {
        let metadata = PageMetadataDto::from(&page);
        Self {
            content: page.into_content(),
            page: metadata,
        }
    }
}

impl<T> PageDto<T> {
    /// Build a page DTO converting each element
    pub fn from_page<U, F>(page: Page<U>, convert: F) -> Self
    where
        F: FnMut(U) -> T,
    {
        page.map(convert).into()
    }
}

impl From<&Order> for SortOrderDto {
    fn from(order: &Order) -> Self {
        Self {
            property: order.property.clone(),
            direction: order.direction.as_str().to_string(),
            ignore_case: order.ignore_case,
        }
    }
}

/// Sort as a list of order DTOs
pub fn sort_to_dto(sort: &Sort) -> Vec<SortOrderDto> {
    sort.iter().map(SortOrderDto::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{Direction, Pageable};

    #[test]
    fn test_page_metadata() {
        let page = Page::paginate((0..45).collect::<Vec<u32>>(), &Pageable::of(2, 20).unwrap());
        let dto = PageDto::from_page(page, |n| n * 10);

        assert_eq!(dto.content, vec![400, 410, 420, 430, 440]);
        assert_eq!(
            dto.page,
            PageMetadataDto {
                size: 20,
                number: 2,
                total_elements: 45,
                total_pages: 3,
                sort: Vec::new(),
            }
        );
    }

    #[test]
    fn test_page_dto_serialization() {
        let dto: PageDto<&str> = Page::unpaged(vec!["a", "b"]).into();
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["content"], serde_json::json!(["a", "b"]));
        assert_eq!(json["page"]["total_pages"], 1);
        assert_eq!(json["page"]["size"], 2);
        assert!(json["page"].get("sort").is_none());
    }

    #[test]
    fn test_page_metadata_carries_sort() {
        let sort = Sort::by(Direction::Desc, ["year"]).and(Sort::by(Direction::Asc, ["id"]));
        let pageable = Pageable::of(0, 2).unwrap().with_sort(sort);
        let dto: PageDto<u32> = Page::paginate(vec![1, 2, 3], &pageable).into();

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["page"]["sort"][0]["property"], "year");
        assert_eq!(json["page"]["sort"][0]["direction"], "desc");
        assert_eq!(json["page"]["sort"][1]["property"], "id");
    }

    #[test]
    fn test_sort_to_dto() {
        let sort = Sort::by(Direction::Desc, ["createdAt"]);
        let dto = sort_to_dto(&sort);
        assert_eq!(dto.len(), 1);
        assert_eq!(dto[0].direction, "desc");
        assert!(!dto[0].ignore_case);
    }
}
