use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use game_core::model::{
    Candidate, CandidateId, CandidateStatsPatch, Question, QuestionId, QuestionStatsPatch, Quiz,
    QuizId, QuizResultRecord, Worldcup, WorldcupId, WorldcupResultRecord,
};

use crate::repository::{QuizStore, StorageError, WorldcupStore};

/// Client for the mapping-store backend's JSON REST dialect.
///
/// The backend owns filtering and ordering: `/quizzes/{id}/start` returns the
/// quiz's questions sorted by number, `/worldcups/{id}/start/{count}` returns a
/// random draw. Stat updates are `PATCH`es carrying full replacement counters.
#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StorageError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let response = check_status(response)?;
        response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn patch_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), StorageError> {
        let response = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        check_status(response)?;
        Ok(())
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), StorageError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(StorageError::NotFound);
    }
    if !status.is_success() {
        return Err(StorageError::Status(status.as_u16()));
    }
    Ok(response)
}

#[async_trait]
impl QuizStore for HttpStore {
    async fn get_quiz(&self, id: QuizId) -> Result<Quiz, StorageError> {
        let record: QuizRecord = self.get_json(&format!("/quizzes/{id}")).await?;
        record.into_quiz()
    }

    async fn start_quiz(&self, id: QuizId) -> Result<Vec<Question>, StorageError> {
        let records: Vec<QuestionRecord> = self.get_json(&format!("/quizzes/{id}/start")).await?;
        records
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect()
    }

    async fn update_question_stats(
        &self,
        id: QuestionId,
        patch: &QuestionStatsPatch,
    ) -> Result<(), StorageError> {
        self.patch_json(&format!("/quiz_questions/{id}"), patch)
            .await
    }

    async fn save_quiz_result(&self, record: &QuizResultRecord) -> Result<(), StorageError> {
        self.post_json("/quiz_results", record).await
    }
}

#[async_trait]
impl WorldcupStore for HttpStore {
    async fn get_worldcup(&self, id: WorldcupId) -> Result<Worldcup, StorageError> {
        let record: WorldcupRecord = self.get_json(&format!("/worldcups/{id}")).await?;
        record.into_worldcup()
    }

    async fn start_worldcup(
        &self,
        id: WorldcupId,
        count: usize,
    ) -> Result<Vec<Candidate>, StorageError> {
        let records: Vec<CandidateRecord> = self
            .get_json(&format!("/worldcups/{id}/start/{count}"))
            .await?;
        records
            .into_iter()
            .map(CandidateRecord::into_candidate)
            .collect()
    }

    async fn update_candidate_stats(
        &self,
        id: CandidateId,
        patch: &CandidateStatsPatch,
    ) -> Result<(), StorageError> {
        self.patch_json(&format!("/worldcup_candidates/{id}"), patch)
            .await
    }

    async fn save_worldcup_result(
        &self,
        record: &WorldcupResultRecord,
    ) -> Result<(), StorageError> {
        self.post_json("/worldcup_results", record).await
    }
}

//
// ─── WIRE RECORDS ──────────────────────────────────────────────────────────────
//

// Persisted shapes mirror the backend's camelCase JSON so domain validation
// stays out of the transport layer.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizRecord {
    id: u64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    session_time_limit: Option<u32>,
}

impl QuizRecord {
    fn into_quiz(self) -> Result<Quiz, StorageError> {
        Quiz::new(
            QuizId::new(self.id),
            self.title,
            self.description,
            self.session_time_limit,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    id: u64,
    quiz_id: u64,
    question_number: u32,
    prompt: String,
    answer: String,
    #[serde(default)]
    time_limit: Option<u32>,
    #[serde(default)]
    correct_count: u32,
    #[serde(default)]
    total_count: u32,
}

impl QuestionRecord {
    fn into_question(self) -> Result<Question, StorageError> {
        Question::from_persisted(
            QuestionId::new(self.id),
            QuizId::new(self.quiz_id),
            self.question_number,
            self.prompt,
            self.answer,
            self.time_limit,
            self.correct_count,
            self.total_count,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorldcupRecord {
    id: u64,
    title: String,
    #[serde(default)]
    description: Option<String>,
}

impl WorldcupRecord {
    fn into_worldcup(self) -> Result<Worldcup, StorageError> {
        Worldcup::new(WorldcupId::new(self.id), self.title, self.description)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidateRecord {
    id: u64,
    worldcup_id: u64,
    name: String,
    #[serde(default)]
    image: Option<Url>,
    #[serde(default)]
    win_count: u32,
    #[serde(default)]
    final_count: u32,
    #[serde(default)]
    appear_count: u32,
}

impl CandidateRecord {
    fn into_candidate(self) -> Result<Candidate, StorageError> {
        Candidate::from_persisted(
            CandidateId::new(self.id),
            WorldcupId::new(self.worldcup_id),
            self.name,
            self.image,
            self.win_count,
            self.final_count,
            self.appear_count,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_record_parses_backend_json() {
        let json = r#"{
            "id": 7,
            "quizId": 2,
            "questionNumber": 3,
            "prompt": "capital of France?",
            "answer": "Paris",
            "timeLimit": 15,
            "correctCount": 4,
            "totalCount": 11
        }"#;
        let record: QuestionRecord = serde_json::from_str(json).unwrap();
        let question = record.into_question().unwrap();
        assert_eq!(question.id(), QuestionId::new(7));
        assert_eq!(question.number(), 3);
        assert_eq!(question.time_limit_secs(), 15);
        assert_eq!(question.total_count(), 11);
    }

    #[test]
    fn question_record_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": 1,
            "quizId": 1,
            "questionNumber": 1,
            "prompt": "q",
            "answer": "a"
        }"#;
        let record: QuestionRecord = serde_json::from_str(json).unwrap();
        let question = record.into_question().unwrap();
        assert_eq!(question.time_limit_secs(), 10);
        assert_eq!(question.correct_count(), 0);
    }

    #[test]
    fn candidate_record_parses_image_url() {
        let json = r#"{
            "id": 3,
            "worldcupId": 1,
            "name": "Tiramisu",
            "image": "https://cdn.example.com/3.png",
            "winCount": 2,
            "appearCount": 5
        }"#;
        let record: CandidateRecord = serde_json::from_str(json).unwrap();
        let candidate = record.into_candidate().unwrap();
        assert_eq!(candidate.win_rate(), 40.0);
        assert!(candidate.image_url().is_some());
    }

    #[test]
    fn blank_wire_data_is_a_serialization_error() {
        let record = QuizRecord {
            id: 1,
            title: "  ".into(),
            description: None,
            session_time_limit: None,
        };
        let err = record.into_quiz().unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let store = HttpStore::new("http://localhost:3000/");
        assert_eq!(store.url("/quizzes/1"), "http://localhost:3000/quizzes/1");
    }
}
