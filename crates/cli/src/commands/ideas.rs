//! `ragent ideas` — a structured answer decoded into article ideas.

use ragent_agent::assembler;
use ragent_core::provider::ResponseFormat;
use ragent_core::tool::ToolRegistry;
use serde::{Deserialize, Serialize};

use super::runtime;
use crate::scenarios::{IDEAS_INSTRUCTIONS, IDEAS_MESSAGE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInfo {
    pub title: String,
    pub short_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleIdeas {
    pub topic_of_all_articles: String,
    pub articles: Vec<ArticleInfo>,
}

impl ArticleIdeas {
    pub fn response_format() -> ResponseFormat {
        ResponseFormat::json_schema(
            "ArticleIdeas",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "topicOfAllArticles": { "type": "string" },
                    "articles": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "title": { "type": "string" },
                                "shortDescription": { "type": "string" }
                            },
                            "required": ["title", "shortDescription"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["topicOfAllArticles", "articles"],
                "additionalProperties": false
            }),
        )
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "Here are {} ideas of articles you could write about {}:\n",
            self.articles.len(),
            self.topic_of_all_articles
        );
        for article in &self.articles {
            out.push_str(&format!("\nTitle: {}\nDescription: {}\n", article.title, article.short_description));
        }
        out
    }
}

pub async fn run(
    api_key: Option<String>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = runtime::load_config(api_key)?;
    runtime::require_api_key(&config)?;

    let provider = runtime::default_provider(&config)?;
    let dispatch = runtime::dispatch_loop(&config, provider, ToolRegistry::new());

    let message = message.unwrap_or_else(|| IDEAS_MESSAGE.to_string());
    let mut conv = assembler::build(IDEAS_INSTRUCTIONS, &message);

    eprint!("  Thinking...");
    let ideas: ArticleIdeas = dispatch
        .run_structured(&mut conv, ArticleIdeas::response_format())
        .await?;
    eprint!("\r              \r");
    runtime::print_answer(&ideas.render());

    Ok(())
}
