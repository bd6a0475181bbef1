//! Google-backed capabilities: `YouTube` Data API as the comment source and
//! Cloud Natural Language for sentiment, syntax and entities.

use std::sync::Arc;

use async_trait::async_trait;
use genie_language::{LanguageClient, Token};
use genie_youtube::YoutubeClient;

use crate::analyzer::{has_question_token, ItemAnalyzer};
use crate::capabilities::{CommentSource, QuestionDetector, SentimentScorer, TrendExtractor};
use crate::error::{CapabilityError, PipelineError};
use crate::pipeline::Pipeline;
use crate::types::{CommentPage, PipelineConfig, RawComment, RunResponse, Trend, VideoMetadata};

pub const DEFAULT_USER_AGENT: &str = "comment-genie/0.1 (comment-analysis)";

#[async_trait]
impl CommentSource for YoutubeClient {
    async fn fetch_video_metadata(&self, video_id: &str) -> Result<VideoMetadata, CapabilityError> {
        let video = self.get_video(video_id).await?;
        Ok(VideoMetadata {
            title: video.snippet.title,
            description: video.snippet.description,
            channel_title: video.snippet.channel_title,
            reported_comment_count: video.statistics.comment_count,
        })
    }

    async fn fetch_comment_page(
        &self,
        video_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<CommentPage, CapabilityError> {
        let page = self.get_comment_threads(video_id, cursor, page_size).await?;
        let items = page
            .items
            .iter()
            .map(|thread| RawComment {
                text: thread.text_display().to_string(),
            })
            .collect();
        Ok(CommentPage {
            items,
            next_cursor: page.next_page_token,
        })
    }
}

/// One Natural Language client serving all three analyses.
#[derive(Clone)]
pub struct GoogleLanguage {
    client: Arc<LanguageClient>,
}

impl GoogleLanguage {
    #[must_use]
    pub fn new(client: Arc<LanguageClient>) -> Self {
        Self { client }
    }

    /// An [`ItemAnalyzer`] whose three capabilities share this client.
    #[must_use]
    pub fn into_analyzer(self, config: &PipelineConfig) -> ItemAnalyzer {
        let shared = Arc::new(self);
        ItemAnalyzer::new(shared.clone(), shared.clone(), shared, config.call_timeout)
    }
}

#[async_trait]
impl SentimentScorer for GoogleLanguage {
    async fn score_sentiment(&self, text: &str) -> Result<f64, CapabilityError> {
        Ok(self.client.analyze_sentiment(text).await?.score)
    }
}

#[async_trait]
impl QuestionDetector for GoogleLanguage {
    async fn detect_question(&self, text: &str) -> Result<bool, CapabilityError> {
        let tokens = self.client.analyze_syntax(text).await?;
        Ok(has_question_token(tokens.iter().map(Token::content)))
    }
}

#[async_trait]
impl TrendExtractor for GoogleLanguage {
    async fn extract_trends(&self, text: &str) -> Result<Vec<Trend>, CapabilityError> {
        let entities = self.client.analyze_entities(text).await?;
        Ok(entities
            .into_iter()
            .map(|entity| Trend {
                name: entity.name,
                category: entity.entity_type,
                salience: entity.salience,
            })
            .collect())
    }
}

/// Wire a [`Pipeline`] from already-built Google clients.
#[must_use]
pub fn google_pipeline(
    youtube: Arc<YoutubeClient>,
    language: Arc<LanguageClient>,
    config: PipelineConfig,
) -> Pipeline {
    let analyzer = GoogleLanguage::new(language).into_analyzer(&config);
    Pipeline::new(youtube, analyzer, config)
}

/// Run the pipeline against the production Google endpoints with one API
/// key for both services.
///
/// Never fails: any run-aborting error is folded into
/// [`RunResponse::Failed`].
pub async fn run_pipeline(video_id: &str, api_key: &str, config: PipelineConfig) -> RunResponse {
    let timeout_secs = config.call_timeout.as_secs().max(1);

    let clients = YoutubeClient::new(api_key, timeout_secs, DEFAULT_USER_AGENT)
        .map_err(CapabilityError::from)
        .and_then(|youtube| {
            let language = LanguageClient::new(api_key, timeout_secs, DEFAULT_USER_AGENT)?;
            Ok((youtube, language))
        });

    let (youtube, language) = match clients {
        Ok(clients) => clients,
        Err(e) => return RunResponse::from(Err(PipelineError::ClientSetup(e))),
    };

    let pipeline = google_pipeline(Arc::new(youtube), Arc::new(language), config);
    RunResponse::from(pipeline.run(video_id).await)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn youtube(server: &MockServer) -> YoutubeClient {
        YoutubeClient::with_base_url("k", 5, "test", &server.uri()).unwrap()
    }

    fn language(server: &MockServer) -> LanguageClient {
        LanguageClient::with_base_url("k", 5, "test", &server.uri()).unwrap()
    }

    #[tokio::test]
    async fn youtube_threads_map_to_raw_comments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .and(query_param("maxResults", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "nextPageToken": "p2",
                "items": [{
                    "id": "t1",
                    "snippet": {
                        "topLevelComment": {"snippet": {"textDisplay": "hello &amp; bye"}},
                        "totalReplyCount": 0
                    }
                }]
            })))
            .mount(&server)
            .await;

        let page = youtube(&server)
            .fetch_comment_page("vid", None, 25)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].text, "hello &amp; bye");
        assert_eq!(page.next_cursor.as_deref(), Some("p2"));
    }

    #[tokio::test]
    async fn syntax_tokens_drive_question_detection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/documents:analyzeSyntax"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tokens": [
                    {"text": {"content": "really", "beginOffset": 0}},
                    {"text": {"content": "?", "beginOffset": 6}}
                ]
            })))
            .mount(&server)
            .await;

        let google = GoogleLanguage::new(Arc::new(language(&server)));
        assert!(google.detect_question("really?").await.unwrap());
    }

    #[tokio::test]
    async fn entities_become_trends() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/documents:analyzeEntities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entities": [{"name": "Rust", "type": "OTHER", "salience": 0.8}]
            })))
            .mount(&server)
            .await;

        let google = GoogleLanguage::new(Arc::new(language(&server)));
        let trends = google.extract_trends("rust").await.unwrap();
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].name, "Rust");
        assert_eq!(trends[0].category, "OTHER");
    }

    #[tokio::test]
    async fn wired_pipeline_runs_end_to_end_against_mocks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "id": "vid",
                    "snippet": {"title": "T", "description": "D", "channelTitle": "C"},
                    "statistics": {"commentCount": "2"}
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "id": "t1",
                    "snippet": {
                        "topLevelComment": {"snippet": {"textDisplay": "Great video!"}},
                        "totalReplyCount": 0
                    }
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/documents:analyzeSentiment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "documentSentiment": {"score": 0.8, "magnitude": 0.8}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/documents:analyzeSyntax"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"tokens": []})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/documents:analyzeEntities"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let config = PipelineConfig {
            call_timeout: Duration::from_secs(5),
            ..PipelineConfig::default()
        };
        let pipeline = google_pipeline(
            Arc::new(youtube(&server)),
            Arc::new(language(&server)),
            config,
        );
        let report = pipeline.run("vid").await.unwrap();

        assert_eq!(report.totals.total_processed, 1);
        assert_eq!(report.comments[0].comment, "great video");
        assert!((report.comments[0].positive_percentage - 90.0).abs() < 1e-9);
        assert!(report.metadata.trends.is_empty());
    }
}
