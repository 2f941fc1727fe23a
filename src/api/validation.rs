use super::ApiError;
use crate::models::media::Season;

/// Returns the parameter value or a 400 naming the missing parameter.
pub fn require_param<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::missing_param(name)),
    }
}

pub fn validate_year(value: Option<&str>) -> Result<i32, ApiError> {
    let raw = require_param("year", value)?;
    let year: i32 = raw.trim().parse().map_err(|_| {
        ApiError::validation(format!("Invalid year: '{}'. Year must be an integer", raw))
    })?;

    if year <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid year: {}. Year must be a positive integer",
            year
        )));
    }
    Ok(year)
}

pub fn validate_season(value: Option<&str>) -> Result<Season, ApiError> {
    let raw = require_param("season", value)?;
    raw.parse::<Season>()
        .map_err(|e| ApiError::validation(e.to_string()))
}

/// Splits a comma separated parameter into its non-empty, trimmed items.
pub fn split_list(name: &str, value: Option<&str>) -> Result<Vec<String>, ApiError> {
    let raw = require_param(name, value)?;
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        return Err(ApiError::missing_param(name));
    }
    Ok(items)
}

pub fn validate_catalog_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid anime ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_param() {
        assert_eq!(require_param("genre", Some("Action")).unwrap(), "Action");
        assert!(require_param("genre", None).is_err());
        assert!(require_param("genre", Some("  ")).is_err());
    }

    #[test]
    fn test_validate_year() {
        assert_eq!(validate_year(Some("2024")).unwrap(), 2024);
        assert_eq!(validate_year(Some(" 1998 ")).unwrap(), 1998);
        assert!(validate_year(Some("twenty")).is_err());
        assert!(validate_year(Some("2024.5")).is_err());
        assert!(validate_year(Some("-3")).is_err());
        assert!(validate_year(None).is_err());
    }

    #[test]
    fn test_validate_season() {
        assert_eq!(validate_season(Some("fall")).unwrap(), Season::Fall);
        assert!(validate_season(Some("rainy")).is_err());
        assert!(validate_season(None).is_err());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("genre", Some("Action,Fantasy")).unwrap(),
            vec!["Action".to_string(), "Fantasy".to_string()]
        );
        assert_eq!(
            split_list("tag", Some("Magic, ,Isekai,")).unwrap(),
            vec!["Magic".to_string(), "Isekai".to_string()]
        );
        assert!(split_list("genre", Some(",,")).is_err());
        assert!(split_list("genre", None).is_err());
    }

    #[test]
    fn test_validate_catalog_id() {
        assert!(validate_catalog_id(1).is_ok());
        assert!(validate_catalog_id(0).is_err());
        assert!(validate_catalog_id(-7).is_err());
    }
}
