//! Discovery query command handler

use std::sync::Arc;

use crate::api::validation::{split_list, validate_season, validate_year};
use crate::cli::DiscoverCommands;
use crate::clients::anilist::AnilistClient;
use crate::config::Config;
use crate::models::media::MediaQuery;
use crate::services::DiscoverService;

fn to_query(command: DiscoverCommands) -> anyhow::Result<MediaQuery> {
    let query = match command {
        DiscoverCommands::Top { genre, tag } => MediaQuery::Top { genre, tag },
        DiscoverCommands::Popular => MediaQuery::Popular,
        DiscoverCommands::Seasonal { season, year } => MediaQuery::Seasonal {
            season: validate_season(Some(&season)).map_err(|e| anyhow::anyhow!("{e}"))?,
            year: validate_year(Some(&year)).map_err(|e| anyhow::anyhow!("{e}"))?,
        },
        DiscoverCommands::Genre { genre } => MediaQuery::Genre { genre },
        DiscoverCommands::Tag { tag } => MediaQuery::Tag { tag },
        DiscoverCommands::MultiGenre { genres } => MediaQuery::MultiGenre {
            genres: split_list("genres", Some(&genres)).map_err(|e| anyhow::anyhow!("{e}"))?,
        },
        DiscoverCommands::MultiTag { tags } => MediaQuery::MultiTag {
            tags: split_list("tags", Some(&tags)).map_err(|e| anyhow::anyhow!("{e}"))?,
        },
        DiscoverCommands::Yearly { year } => MediaQuery::Yearly {
            year: validate_year(Some(&year)).map_err(|e| anyhow::anyhow!("{e}"))?,
        },
    };
    Ok(query)
}

pub async fn cmd_discover(config: &Config, command: DiscoverCommands) -> anyhow::Result<()> {
    let query = to_query(command)?;
    let service = DiscoverService::new(Arc::new(AnilistClient::new(&config.upstream)?));

    let media = service.fetch(&query).await?;

    if media.is_empty() {
        println!("No anime found.");
        return Ok(());
    }

    println!("{} results ({} query)", media.len(), query.name());
    println!("{:-<60}", "");

    for (i, item) in media.iter().enumerate() {
        let title = item["title"]["romaji"].as_str().unwrap_or("<untitled>");
        let score = item["averageScore"]
            .as_i64()
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        let genres = item["genres"]
            .as_array()
            .map(|g| {
                g.iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        println!("[{}] {} (score: {})", i + 1, title, score);
        if !genres.is_empty() {
            println!("    {genres}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::Season;

    #[test]
    fn test_to_query_validates_like_the_api() {
        assert_eq!(
            to_query(DiscoverCommands::Seasonal {
                season: "spring".into(),
                year: "2019".into()
            })
            .unwrap(),
            MediaQuery::Seasonal {
                season: Season::Spring,
                year: 2019
            }
        );
        assert!(to_query(DiscoverCommands::Yearly { year: "soon".into() }).is_err());
        assert_eq!(
            to_query(DiscoverCommands::MultiTag {
                tags: "Magic,Isekai".into()
            })
            .unwrap(),
            MediaQuery::MultiTag {
                tags: vec!["Magic".into(), "Isekai".into()]
            }
        );
    }
}
