// hub-core/src/domain/catalog/filter.rs

use std::cmp::Ordering;
use validator::Validate;

use super::model::ResourceRow;
use crate::domain::error::DomainError;

pub const DEFAULT_LIMIT: u32 = 100;

/// Caller-supplied filters. Empty or absent filters match everything.
/// The limit has no upper bound here; callers cap it where they need to.
#[derive(Debug, Validate, Clone, PartialEq)]
pub struct QueryCriteria {
    pub name: Option<String>,

    pub kind: Option<String>,

    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: u32,
}

impl Default for QueryCriteria {
    fn default() -> Self {
        Self {
            name: None,
            kind: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `LOWER(type) = needle`
    KindEquals(String),
    /// `LOWER(name)` contains `needle`
    NameContains(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    RatingDesc,
    NameAsc,
}

/// Declarative query specification handed to a [`ResourceStore`](crate::ports::store::ResourceStore).
///
/// Needles are stored lowercased; predicates are conjunctive.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceQuery {
    pub predicates: Vec<Predicate>,
    pub order: Vec<SortKey>,
    pub limit: u32,
}

impl ResourceQuery {
    pub fn from_criteria(criteria: &QueryCriteria) -> Result<Self, DomainError> {
        criteria
            .validate()
            .map_err(|e| DomainError::InvalidCriteria(e.to_string()))?;

        let mut predicates = Vec::new();

        if let Some(kind) = non_empty(criteria.kind.as_deref()) {
            predicates.push(Predicate::KindEquals(kind.to_lowercase()));
        }
        if let Some(name) = non_empty(criteria.name.as_deref()) {
            predicates.push(Predicate::NameContains(name.to_lowercase()));
        }

        Ok(Self {
            predicates,
            order: vec![SortKey::RatingDesc, SortKey::NameAsc],
            limit: criteria.limit,
        })
    }

    /// Evaluates the predicates against a row, for stores without a query engine.
    pub fn matches(&self, row: &ResourceRow) -> bool {
        self.predicates.iter().all(|p| match p {
            Predicate::KindEquals(kind) => row.kind.to_lowercase() == *kind,
            Predicate::NameContains(needle) => row.name.to_lowercase().contains(needle.as_str()),
        })
    }

    pub fn compare(&self, a: &ResourceRow, b: &ResourceRow) -> Ordering {
        self.order
            .iter()
            .map(|key| match key {
                SortKey::RatingDesc => b.rating.total_cmp(&a.rating),
                SortKey::NameAsc => a.name.cmp(&b.name),
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
