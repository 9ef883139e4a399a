use serde::{Deserialize, Serialize};

use crate::models::user::UserSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    /// Star rating, 1 through 5.
    pub rating: u8,
    pub content: String,
    pub user: UserSummary,
    #[serde(default)]
    pub posted_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub rating: u8,
    pub content: String,
}

impl ReviewPayload {
    pub fn validate(&self) -> Result<(), String> {
        if self.rating < 1 || self.rating > 5 {
            return Err("Rating must be between 1 and 5".to_string());
        }
        if self.content.trim().is_empty() {
            return Err("Review content is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_rating() {
        let review = ReviewPayload {
            rating: 6,
            content: "Great venue".to_string(),
        };
        assert!(review.validate().is_err());
    }

    #[test]
    fn rejects_blank_content() {
        let review = ReviewPayload {
            rating: 4,
            content: "   ".to_string(),
        };
        assert!(review.validate().is_err());
    }

    #[test]
    fn accepts_valid_review() {
        let review = ReviewPayload {
            rating: 5,
            content: "Great venue".to_string(),
        };
        assert!(review.validate().is_ok());
    }
}
