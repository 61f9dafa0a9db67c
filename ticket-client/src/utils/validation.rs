// src/utils/validation.rs

use crate::domain::category::Category;
use crate::domain::roster;
use crate::error::{AppError, AppResult};

/// バリデーション定数
pub mod common {
    pub mod ticket {
        pub const DESCRIPTION_MIN_LENGTH: u64 = 1;
        pub const DESCRIPTION_MAX_LENGTH: u64 = 4000;
    }
}

/// サブカテゴリが現在のカテゴリに属しているか検証する。
/// 空のサブカテゴリは常に許容（任意項目）。
pub fn validate_sub_category(category: &str, sub_category: &str) -> AppResult<()> {
    if sub_category.is_empty() {
        return Ok(());
    }
    let Some(category) = Category::from_str(category) else {
        return Err(AppError::ValidationError(format!(
            "sub_category: '{}' requires a recognized category",
            sub_category
        )));
    };
    if category.is_valid_sub_category(sub_category) {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "sub_category: '{}' is not valid for category '{}'",
            sub_category, category
        )))
    }
}

/// 担当者名が固定ロスターに含まれるか検証する
pub fn validate_assignees(names: &[String]) -> AppResult<()> {
    for name in names {
        if !roster::is_known_engineer(name) {
            return Err(AppError::ValidationError(format!(
                "assigned_to: unknown engineer '{}'",
                name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_category_must_match_category() {
        assert!(validate_sub_category("Network", "Router Failure").is_ok());
        assert!(validate_sub_category("Network", "Disk Failure").is_err());
        assert!(validate_sub_category("", "Router Failure").is_err());
    }

    #[test]
    fn test_empty_sub_category_is_always_allowed() {
        assert!(validate_sub_category("Network", "").is_ok());
        assert!(validate_sub_category("", "").is_ok());
    }

    #[test]
    fn test_assignees_must_be_on_roster() {
        let known = vec!["Ngozi Umeh".to_string()];
        assert!(validate_assignees(&known).is_ok());

        let unknown = vec!["Ngozi Umeh".to_string(), "Ghost Writer".to_string()];
        let err = validate_assignees(&unknown).unwrap_err();
        assert!(err.is_validation());
    }
}
