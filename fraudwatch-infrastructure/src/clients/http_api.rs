// HTTP client for the detection backend
// Implements both domain gateways over the backend's JSON REST surface.
// Non-2xx responses are parsed for a `detail` field; transport failures map
// to ApiError::Network. Timestamps are normalized to epoch millis here and
// nowhere else.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::warn;

use fraudwatch_domain::entities::{
    AdvanceOutcome,
    CasePayload,
    DetectionCase,
    DetectionStats,
    HourlyDistribution,
    ReloadOutcome,
    ResetOutcome,
    RuntimeConfig,
    SimulationHealth,
    SimulationStatus,
    TimeSeriesPoint,
    TopAccount,
    TradePair,
};
use fraudwatch_domain::error::{ApiError, SimulationError};
use fraudwatch_domain::ports::{DetectionFeed, SimulationGateway};
use fraudwatch_domain::utils::parse_timestamp_millis;
use fraudwatch_domain::value_objects::{ModelFilter, ModelKind};

pub struct HttpApiClient {
    http: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &RuntimeConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.map_err(transport_error)?;
        decode(response).await
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(remote_error(status, response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Network(format!("invalid response body: {}", err)))
}

async fn remote_error(status: StatusCode, response: Response) -> ApiError {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<String>,
    }
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail);
    ApiError::remote(status.as_u16(), detail)
}

fn list_query(model: ModelFilter, limit: Option<usize>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let ModelFilter::Only(kind) = model {
        query.push(("model", kind.as_str().to_string()));
    }
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    query
}

/// The API mixes ISO strings and epoch millis for timestamps.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimestampField {
    Millis(i64),
    Text(String),
}

impl TimestampField {
    fn into_millis(self) -> Option<i64> {
        match self {
            TimestampField::Millis(ms) => Some(ms),
            TimestampField::Text(text) => match parse_timestamp_millis(&text) {
                Ok(ms) => Some(ms),
                Err(err) => {
                    warn!("{}", err);
                    None
                }
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetectionDto {
    id: String,
    model: String,
    timestamp: TimestampField,
    #[serde(rename = "type", default)]
    kind: String,
    accounts: Vec<String>,
    score: f64,
    #[serde(default)]
    is_sanctioned: bool,
    #[serde(default)]
    sanction_id: Option<String>,
    #[serde(default)]
    sanction_type: Option<String>,
    #[serde(default)]
    details: String,
    #[serde(default)]
    raw: Value,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl DetectionDto {
    /// Normalizes one wire record. Unknown models and unparsable timestamps
    /// are dropped with a warning rather than failing the whole fetch.
    fn into_case(self) -> Option<DetectionCase> {
        let Some(model) = ModelKind::parse(&self.model) else {
            warn!("dropping detection {} with unknown model '{}'", self.id, self.model);
            return None;
        };
        let timestamp_ms = self.timestamp.into_millis()?;
        let record = Value::Object(self.extra);
        let payload = CasePayload::from_raw(model, &self.raw, &record);
        Some(DetectionCase {
            id: self.id,
            model,
            timestamp_ms,
            kind: self.kind,
            accounts: self.accounts,
            score: self.score,
            is_sanctioned: self.is_sanctioned,
            sanction_id: self.sanction_id,
            sanction_type: self.sanction_type,
            details: self.details,
            payload,
        })
    }
}

fn normalize_cases(dtos: Vec<DetectionDto>) -> Vec<DetectionCase> {
    dtos.into_iter().filter_map(DetectionDto::into_case).collect()
}

#[derive(Debug, Deserialize)]
struct SimulationStatusDto {
    current_time: Option<String>,
    status: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdvanceDto {
    current_time: TimestampField,
    days_advanced: u32,
    hours_advanced: u32,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResetDto {
    current_time: TimestampField,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct HealthDto {
    #[allow(dead_code)]
    status: String,
}

fn clock_millis(field: TimestampField) -> Result<i64, ApiError> {
    field
        .into_millis()
        .ok_or_else(|| ApiError::Network("backend returned an unparsable clock time".to_string()))
}

#[async_trait]
impl SimulationGateway for HttpApiClient {
    async fn status(&self) -> Result<SimulationStatus, SimulationError> {
        let dto: SimulationStatusDto = self.get_json("/api/simulation/status", &[]).await?;
        let current_time_ms = dto
            .current_time
            .and_then(|text| TimestampField::Text(text).into_millis());
        let status = match dto.status.as_str() {
            "running" => SimulationHealth::Running,
            "not_initialized" => SimulationHealth::NotInitialized,
            _ => SimulationHealth::Error,
        };
        Ok(SimulationStatus {
            current_time_ms,
            status,
            error: dto.error,
        })
    }

    async fn advance(&self, days: u32, hours: u32) -> Result<AdvanceOutcome, SimulationError> {
        let dto: AdvanceDto = self
            .post_json(
                "/api/simulation/advance",
                Some(json!({ "days": days, "hours": hours })),
            )
            .await?;
        Ok(AdvanceOutcome {
            current_time_ms: clock_millis(dto.current_time)?,
            days_advanced: dto.days_advanced,
            hours_advanced: dto.hours_advanced,
            message: dto.message,
        })
    }

    async fn reset(&self) -> Result<ResetOutcome, SimulationError> {
        let dto: ResetDto = self.post_json("/api/simulation/reset", None).await?;
        Ok(ResetOutcome {
            current_time_ms: clock_millis(dto.current_time)?,
            message: dto.message,
        })
    }
}

#[async_trait]
impl DetectionFeed for HttpApiClient {
    async fn stats(&self) -> Result<DetectionStats, ApiError> {
        self.get_json("/api/stats", &[]).await
    }

    async fn detections(
        &self,
        model: ModelFilter,
        limit: Option<usize>,
    ) -> Result<Vec<DetectionCase>, ApiError> {
        let dtos: Vec<DetectionDto> = self
            .get_json("/api/detections", &list_query(model, limit))
            .await?;
        Ok(normalize_cases(dtos))
    }

    async fn sanctions(
        &self,
        model: ModelFilter,
        limit: Option<usize>,
    ) -> Result<Vec<DetectionCase>, ApiError> {
        let dtos: Vec<DetectionDto> = self
            .get_json("/api/sanctions", &list_query(model, limit))
            .await?;
        Ok(normalize_cases(dtos))
    }

    async fn timeseries(&self, interval: &str) -> Result<Vec<TimeSeriesPoint>, ApiError> {
        self.get_json("/api/timeseries", &[("interval", interval.to_string())])
            .await
    }

    async fn top_accounts(&self, limit: usize) -> Result<Vec<TopAccount>, ApiError> {
        self.get_json("/api/top-accounts", &[("limit", limit.to_string())])
            .await
    }

    async fn hourly_distribution(&self) -> Result<HourlyDistribution, ApiError> {
        self.get_json("/api/hourly-distribution", &[]).await
    }

    async fn trade_pairs(&self, model: ModelKind) -> Result<Vec<TradePair>, ApiError> {
        self.get_json(&format!("/api/trade-pairs/{}", model.as_str()), &[])
            .await
    }

    async fn reload(&self) -> Result<ReloadOutcome, ApiError> {
        self.post_json("/api/reload", None).await
    }

    async fn health(&self) -> Result<(), ApiError> {
        let _: HealthDto = self.get_json("/health", &[]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalizes_iso_and_millis_timestamps() {
        let dtos: Vec<DetectionDto> = serde_json::from_value(json!([
            {
                "id": "w1",
                "model": "wash",
                "timestamp": "2025-02-01T00:00:00Z",
                "type": "IMMEDIATE_BOT",
                "accounts": ["A", "B"],
                "score": 91.5,
                "is_sanctioned": true,
                "sanction_id": "s1",
                "details": "",
                "raw": { "laundered_amount": 100.0, "winner_account": "A" }
            },
            {
                "id": "f1",
                "model": "funding",
                "timestamp": 1738368000000i64,
                "type": "CRITICAL",
                "accounts": ["A"],
                "score": 80.0,
                "raw": { "window_funding": 50.0 }
            }
        ]))
        .expect("parse dtos");

        let cases = normalize_cases(dtos);
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].timestamp_ms, cases[1].timestamp_ms);
        assert!(cases[0].is_sanctioned);
        assert!(matches!(
            cases[0].payload,
            CasePayload::Wash { laundered_amount, .. } if laundered_amount == 100.0
        ));
        assert!(matches!(
            cases[1].payload,
            CasePayload::Funding { window_funding } if window_funding == 50.0
        ));
    }

    #[test]
    fn drops_unknown_models_and_bad_timestamps() {
        let dtos: Vec<DetectionDto> = serde_json::from_value(json!([
            {
                "id": "x1",
                "model": "insider",
                "timestamp": 1i64,
                "accounts": ["A"],
                "score": 10.0
            },
            {
                "id": "w2",
                "model": "wash",
                "timestamp": "not a time",
                "accounts": ["A"],
                "score": 10.0
            }
        ]))
        .expect("parse dtos");
        assert!(normalize_cases(dtos).is_empty());
    }

    #[test]
    fn flattened_record_fields_feed_the_payload_adapter() {
        // laundered amount at the record level instead of inside raw
        let dto: DetectionDto = serde_json::from_value(json!({
            "id": "w3",
            "model": "wash",
            "timestamp": 1000i64,
            "accounts": ["A"],
            "score": 70.0,
            "laundered_amount": 33.0
        }))
        .expect("parse dto");
        let case = dto.into_case().expect("normalize");
        assert!(matches!(
            case.payload,
            CasePayload::Wash { laundered_amount, .. } if laundered_amount == 33.0
        ));
    }

    #[test]
    fn list_query_encodes_filters() {
        assert!(list_query(ModelFilter::All, None).is_empty());
        let query = list_query(ModelFilter::Only(ModelKind::Cooperative), Some(50));
        assert_eq!(
            query,
            vec![
                ("model", "cooperative".to_string()),
                ("limit", "50".to_string())
            ]
        );
    }
}
