//! Declarative descriptors for the AniList discovery queries.
//!
//! Every `/api/get_*` route maps to one [`MediaQuery`] variant. The variant
//! carries the already-validated request parameters and knows its page size,
//! its GraphQL document and the variables object sent next to it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Season year pinned by the "popular right now" listing.
pub const POPULAR_SEASON_YEAR: i32 = 2024;

/// Selection shared by every discovery query.
const MEDIA_FRAGMENT: &str = r#"
fragment MediaFields on Media {
  id
  title { romaji }
  description(asHtml: false)
  genres
  tags { name }
  averageScore
  popularity
  coverImage { large }
}
"#;

const PAGE_INFO: &str = "    pageInfo { total currentPage lastPage hasNextPage perPage }\n";

const SORT_SCORE: &str = "SCORE_DESC";
const SORT_POPULARITY: &str = "POPULARITY_DESC";
const SORT_POPULARITY_THEN_SCORE: &str = "[POPULARITY_DESC, SCORE_DESC]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Winter => "WINTER",
            Self::Spring => "SPRING",
            Self::Summer => "SUMMER",
            Self::Fall => "FALL",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSeason(pub String);

impl fmt::Display for UnknownSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown season '{}'. Expected one of WINTER, SPRING, SUMMER, FALL",
            self.0
        )
    }
}

impl std::error::Error for UnknownSeason {}

impl FromStr for Season {
    type Err = UnknownSeason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WINTER" => Ok(Self::Winter),
            "SPRING" => Ok(Self::Spring),
            "SUMMER" => Ok(Self::Summer),
            "FALL" | "AUTUMN" => Ok(Self::Fall),
            _ => Err(UnknownSeason(s.to_string())),
        }
    }
}

/// Variables object posted next to the GraphQL document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variables {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(rename = "genre_in", skip_serializing_if = "Option::is_none")]
    pub genre_in: Option<Vec<String>>,
    #[serde(rename = "tag_in", skip_serializing_if = "Option::is_none")]
    pub tag_in: Option<Vec<String>>,
}

impl Variables {
    const fn page(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            genre: None,
            tag: None,
            season: None,
            year: None,
            genre_in: None,
            tag_in: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaQuery {
    /// Highest scored anime, optionally narrowed by one genre and/or tag.
    Top {
        genre: Option<String>,
        tag: Option<String>,
    },
    /// Currently airing shows of [`POPULAR_SEASON_YEAR`].
    Popular,
    Seasonal { season: Season, year: i32 },
    Genre { genre: String },
    Tag { tag: String },
    MultiGenre { genres: Vec<String> },
    MultiTag { tags: Vec<String> },
    Yearly { year: i32 },
}

impl MediaQuery {
    /// Short stable name used in logs and metric labels.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Top { .. } => "top",
            Self::Popular => "popular",
            Self::Seasonal { .. } => "seasonal",
            Self::Genre { .. } => "genre",
            Self::Tag { .. } => "tag",
            Self::MultiGenre { .. } => "multi_genre",
            Self::MultiTag { .. } => "multi_tag",
            Self::Yearly { .. } => "yearly",
        }
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        match self {
            Self::Top { .. } | Self::Popular => 20,
            Self::Seasonal { .. } | Self::Yearly { .. } => 50,
            Self::Genre { .. } | Self::Tag { .. } | Self::MultiGenre { .. } | Self::MultiTag { .. } => 25,
        }
    }

    const fn includes_page_info(&self) -> bool {
        matches!(self, Self::Seasonal { .. } | Self::Yearly { .. })
    }

    #[must_use]
    pub fn variables(&self) -> Variables {
        let mut vars = Variables::page(self.per_page());

        match self {
            Self::Top { genre, tag } => {
                vars.genre.clone_from(genre);
                vars.tag.clone_from(tag);
            }
            Self::Popular => {}
            Self::Seasonal { season, year } => {
                vars.season = Some(*season);
                vars.year = Some(*year);
            }
            Self::Genre { genre } => vars.genre = Some(genre.clone()),
            Self::Tag { tag } => vars.tag = Some(tag.clone()),
            Self::MultiGenre { genres } => vars.genre_in = Some(genres.clone()),
            Self::MultiTag { tags } => vars.tag_in = Some(tags.clone()),
            Self::Yearly { year } => vars.year = Some(*year),
        }

        vars
    }

    /// Variable declarations and `media(...)` arguments of the document.
    fn signature(&self) -> (&'static str, String) {
        match self {
            Self::Top { .. } => (
                "$genre: String, $tag: String",
                format!("type: ANIME, genre: $genre, tag: $tag, sort: {SORT_SCORE}"),
            ),
            Self::Popular => (
                "",
                format!(
                    "type: ANIME, seasonYear: {POPULAR_SEASON_YEAR}, status: RELEASING, sort: {SORT_POPULARITY}"
                ),
            ),
            Self::Seasonal { .. } => (
                "$season: MediaSeason, $year: Int",
                format!("type: ANIME, season: $season, seasonYear: $year, sort: {SORT_POPULARITY}"),
            ),
            Self::Genre { .. } => (
                "$genre: String",
                format!("type: ANIME, genre: $genre, sort: {SORT_POPULARITY_THEN_SCORE}"),
            ),
            Self::Tag { .. } => (
                "$tag: String",
                format!("type: ANIME, tag: $tag, sort: {SORT_POPULARITY_THEN_SCORE}"),
            ),
            Self::MultiGenre { .. } => (
                "$genre_in: [String]",
                format!("type: ANIME, genre_in: $genre_in, sort: {SORT_POPULARITY_THEN_SCORE}"),
            ),
            Self::MultiTag { .. } => (
                "$tag_in: [String]",
                format!("type: ANIME, tag_in: $tag_in, sort: {SORT_POPULARITY_THEN_SCORE}"),
            ),
            Self::Yearly { .. } => (
                "$year: Int",
                format!("type: ANIME, seasonYear: $year, sort: {SORT_POPULARITY}"),
            ),
        }
    }

    /// Full GraphQL document for this query.
    #[must_use]
    pub fn document(&self) -> String {
        let (declarations, arguments) = self.signature();
        let declarations = if declarations.is_empty() {
            "$page: Int, $perPage: Int".to_string()
        } else {
            format!("$page: Int, $perPage: Int, {declarations}")
        };
        let page_info = if self.includes_page_info() {
            PAGE_INFO
        } else {
            ""
        };

        format!(
            "query ({declarations}) {{\n  Page(page: $page, perPage: $perPage) {{\n{page_info}    media({arguments}) {{\n      ...MediaFields\n    }}\n  }}\n}}\n{MEDIA_FRAGMENT}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_per_page_by_variant() {
        assert_eq!(MediaQuery::Top { genre: None, tag: None }.per_page(), 20);
        assert_eq!(MediaQuery::Popular.per_page(), 20);
        assert_eq!(
            MediaQuery::Seasonal {
                season: Season::Fall,
                year: 2023
            }
            .per_page(),
            50
        );
        assert_eq!(MediaQuery::Yearly { year: 2023 }.per_page(), 50);
        assert_eq!(
            MediaQuery::Genre {
                genre: "Action".into()
            }
            .per_page(),
            25
        );
        assert_eq!(MediaQuery::Tag { tag: "Isekai".into() }.per_page(), 25);
        assert_eq!(MediaQuery::MultiGenre { genres: vec![] }.per_page(), 25);
        assert_eq!(MediaQuery::MultiTag { tags: vec![] }.per_page(), 25);
    }

    #[test]
    fn test_top_variables_keep_raw_strings() {
        let query = MediaQuery::Top {
            genre: Some("Slice of Life".into()),
            tag: Some(" Iyashikei ".into()),
        };
        let vars = serde_json::to_value(query.variables()).unwrap();

        assert_eq!(
            vars,
            json!({
                "page": 1,
                "perPage": 20,
                "genre": "Slice of Life",
                "tag": " Iyashikei "
            })
        );
    }

    #[test]
    fn test_absent_filters_are_omitted() {
        let vars = serde_json::to_value(MediaQuery::Popular.variables()).unwrap();
        assert_eq!(vars, json!({ "page": 1, "perPage": 20 }));
    }

    #[test]
    fn test_list_variables_use_snake_case_keys() {
        let query = MediaQuery::MultiGenre {
            genres: vec!["Action".into(), "Fantasy".into()],
        };
        let vars = serde_json::to_value(query.variables()).unwrap();
        assert_eq!(vars["genre_in"], json!(["Action", "Fantasy"]));
        assert!(vars.get("genreIn").is_none());

        let query = MediaQuery::MultiTag {
            tags: vec!["Magic".into()],
        };
        let vars = serde_json::to_value(query.variables()).unwrap();
        assert_eq!(vars["tag_in"], json!(["Magic"]));
    }

    #[test]
    fn test_seasonal_variables() {
        let query = MediaQuery::Seasonal {
            season: Season::Spring,
            year: 2022,
        };
        let vars = serde_json::to_value(query.variables()).unwrap();
        assert_eq!(vars["season"], "SPRING");
        assert_eq!(vars["year"], 2022);
        assert_eq!(vars["perPage"], 50);
    }

    #[test]
    fn test_documents_declare_what_they_use() {
        let doc = MediaQuery::Seasonal {
            season: Season::Winter,
            year: 2020,
        }
        .document();
        assert!(doc.contains("$season: MediaSeason"));
        assert!(doc.contains("seasonYear: $year"));
        assert!(doc.contains("pageInfo"));
        assert!(doc.contains("fragment MediaFields on Media"));

        let doc = MediaQuery::Popular.document();
        assert!(doc.starts_with("query ($page: Int, $perPage: Int) {"));
        assert!(doc.contains("seasonYear: 2024, status: RELEASING, sort: POPULARITY_DESC"));
        assert!(!doc.contains("pageInfo"));

        let doc = MediaQuery::Genre {
            genre: "Drama".into(),
        }
        .document();
        assert!(doc.contains("sort: [POPULARITY_DESC, SCORE_DESC]"));

        let doc = MediaQuery::Top {
            genre: None,
            tag: None,
        }
        .document();
        assert!(doc.contains("sort: SCORE_DESC"));
    }

    #[test]
    fn test_season_parsing() {
        assert_eq!("winter".parse::<Season>().unwrap(), Season::Winter);
        assert_eq!("SUMMER".parse::<Season>().unwrap(), Season::Summer);
        assert_eq!("Autumn".parse::<Season>().unwrap(), Season::Fall);
        assert!("monsoon".parse::<Season>().is_err());
    }
}
