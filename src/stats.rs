//! Remote profile stats: a freshness-windowed LocalStorage cache plus
//! per-source JSON normalization. Each source is fetched, parsed, displayed
//! and persisted independently; one source failing never blocks the others.

use serde::{Deserialize, Serialize};

/// Cached stats older than this are treated as absent.
pub const FRESHNESS_WINDOW_MS: f64 = 6.0 * 60.0 * 60.0 * 1000.0;
/// Per-source fetch abort timeout.
#[allow(dead_code)]
pub const FETCH_TIMEOUT_MS: i32 = 8_000;

pub const GFG_STATS_URL: &str = "https://geeks-for-geeks-api.vercel.app/ankitmahadani";
pub const CODEFORCES_STATS_URL: &str =
    "https://codeforces.com/api/user.info?handles=ankitmahadani181";
pub const GITHUB_STATS_URL: &str = "https://api.github.com/users/Ankit-Mahadani";

/// Problem-solving profile numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GfgStats {
    pub coding_score: u32,
    pub total_solved: u32,
}

/// Competitive-rating numbers; missing values normalize to "Unrated"/"N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestStats {
    pub rating: String,
    pub max_rating: String,
    pub rank: String,
}

impl Default for ContestStats {
    fn default() -> Self {
        Self {
            rating: "Unrated".to_string(),
            max_rating: "Unrated".to_string(),
            rank: "N/A".to_string(),
        }
    }
}

/// Public hosting-profile numbers; a missing display name normalizes to "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubStats {
    pub name: String,
    pub public_repos: u32,
    pub followers: u32,
}

impl Default for GithubStats {
    fn default() -> Self {
        Self {
            name: "N/A".to_string(),
            public_repos: 0,
            followers: 0,
        }
    }
}

/// Per-panel fetch lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceState<T> {
    Loading,
    Ready(T),
    Failed,
}

/// Whatever subset of the sources has resolved successfully.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub gfg: Option<GfgStats>,
    pub codeforces: Option<ContestStats>,
    pub github: Option<GithubStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedStats {
    pub snapshot: StatsSnapshot,
    pub timestamp: f64,
}

pub fn is_fresh(stored_ms: f64, now_ms: f64) -> bool {
    now_ms - stored_ms <= FRESHNESS_WINDOW_MS
}

impl CachedStats {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "stats-cache";

    /// Load the cached snapshot if it is still inside the freshness window
    /// (WASM only). Stale or unreadable blobs are a plain miss.
    #[cfg(target_arch = "wasm32")]
    pub fn load(now_ms: f64) -> Option<StatsSnapshot> {
        let store = crate::util::local_storage()?;
        let raw = store.get_item(Self::STORAGE_KEY).ok()??;
        let cached = serde_json::from_str::<CachedStats>(&raw).ok()?;
        if is_fresh(cached.timestamp, now_ms) {
            Some(cached.snapshot)
        } else {
            None
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn store(snapshot: &StatsSnapshot, now_ms: f64) {
        if let Some(store) = crate::util::local_storage() {
            let cached = CachedStats {
                snapshot: snapshot.clone(),
                timestamp: now_ms,
            };
            if let Ok(json) = serde_json::to_string(&cached) {
                let _ = store.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(_now_ms: f64) -> Option<StatsSnapshot> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn store(_snapshot: &StatsSnapshot, _now_ms: f64) {}
}

// ---------------- Source payload normalization -----------------

#[derive(Deserialize, Default)]
struct GfgEnvelope {
    #[serde(default)]
    info: GfgInfo,
}

#[derive(Deserialize, Default)]
struct GfgInfo {
    #[serde(default, rename = "codingScore")]
    coding_score: f64,
    #[serde(default, rename = "totalProblemsSolved")]
    total_problems_solved: u32,
}

pub fn parse_gfg(body: &str) -> Result<GfgStats, serde_json::Error> {
    let env: GfgEnvelope = serde_json::from_str(body)?;
    Ok(GfgStats {
        coding_score: env.info.coding_score.max(0.0).round() as u32,
        total_solved: env.info.total_problems_solved,
    })
}

#[derive(Deserialize, Default)]
struct CodeforcesEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    result: Vec<CodeforcesUser>,
}

#[derive(Deserialize, Default)]
struct CodeforcesUser {
    rating: Option<u32>,
    #[serde(rename = "maxRating")]
    max_rating: Option<u32>,
    rank: Option<String>,
}

pub fn parse_codeforces(body: &str) -> Result<ContestStats, serde_json::Error> {
    let env: CodeforcesEnvelope = serde_json::from_str(body)?;
    let user = if env.status == "OK" {
        env.result.into_iter().next()
    } else {
        None
    };
    Ok(match user {
        Some(u) => ContestStats {
            rating: u
                .rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| "Unrated".to_string()),
            max_rating: u
                .max_rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| "Unrated".to_string()),
            rank: u.rank.unwrap_or_else(|| "N/A".to_string()),
        },
        None => ContestStats::default(),
    })
}

#[derive(Deserialize, Default)]
struct GithubUser {
    name: Option<String>,
    #[serde(default)]
    public_repos: u32,
    #[serde(default)]
    followers: u32,
}

pub fn parse_github(body: &str) -> Result<GithubStats, serde_json::Error> {
    let user: GithubUser = serde_json::from_str(body)?;
    Ok(GithubStats {
        name: user.name.unwrap_or_else(|| "N/A".to_string()),
        public_repos: user.public_repos,
        followers: user.followers,
    })
}

// ---------------- Fetch plumbing -----------------

/// GET `url` as text with an abort timeout so a hung source converges to a
/// failed panel instead of loading forever.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_text(url: &str) -> Result<String, wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let controller = web_sys::AbortController::new()?;
    let init = web_sys::RequestInit::new();
    init.set_signal(Some(&controller.signal()));

    let abort_cb = {
        let controller = controller.clone();
        Closure::wrap(Box::new(move || controller.abort()) as Box<dyn FnMut()>)
    };
    let timeout_id = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        abort_cb.as_ref().unchecked_ref(),
        FETCH_TIMEOUT_MS,
    )?;

    let fetched = JsFuture::from(window.fetch_with_str_and_init(url, &init)).await;
    window.clear_timeout_with_handle(timeout_id);
    drop(abort_cb);

    let response: web_sys::Response = fetched?.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "{url} responded with status {}",
            response.status()
        )));
    }
    let body = JsFuture::from(response.text()?).await?;
    body.as_string()
        .ok_or_else(|| JsValue::from_str("response body was not text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freshness_boundary_is_exact() {
        let now = 10_000_000_000.0;
        assert!(is_fresh(now - (FRESHNESS_WINDOW_MS - 1.0), now));
        assert!(is_fresh(now - FRESHNESS_WINDOW_MS, now));
        assert!(!is_fresh(now - (FRESHNESS_WINDOW_MS + 1.0), now));
    }

    #[test]
    fn gfg_payload_normalizes() {
        let stats =
            parse_gfg(r#"{"info":{"codingScore":357.5,"totalProblemsSolved":214}}"#).unwrap();
        assert_eq!(stats.coding_score, 358);
        assert_eq!(stats.total_solved, 214);
    }

    #[test]
    fn gfg_missing_fields_default_to_zero() {
        let stats = parse_gfg(r#"{"info":{}}"#).unwrap();
        assert_eq!(stats, GfgStats::default());
        let stats = parse_gfg(r#"{}"#).unwrap();
        assert_eq!(stats.total_solved, 0);
    }

    #[test]
    fn codeforces_rated_user_parses() {
        let body = r#"{"status":"OK","result":[{"handle":"x","rating":1432,"maxRating":1520,"rank":"specialist"}]}"#;
        let stats = parse_codeforces(body).unwrap();
        assert_eq!(stats.rating, "1432");
        assert_eq!(stats.max_rating, "1520");
        assert_eq!(stats.rank, "specialist");
    }

    #[test]
    fn codeforces_unrated_user_normalizes() {
        let body = r#"{"status":"OK","result":[{"handle":"x"}]}"#;
        let stats = parse_codeforces(body).unwrap();
        assert_eq!(stats.rating, "Unrated");
        assert_eq!(stats.rank, "N/A");
    }

    #[test]
    fn codeforces_failed_status_normalizes() {
        let body = r#"{"status":"FAILED","comment":"handles: not found"}"#;
        assert_eq!(parse_codeforces(body).unwrap(), ContestStats::default());
    }

    #[test]
    fn github_missing_name_normalizes() {
        let stats = parse_github(r#"{"login":"x","public_repos":12,"followers":3}"#).unwrap();
        assert_eq!(stats.name, "N/A");
        assert_eq!(stats.public_repos, 12);
        assert_eq!(stats.followers, 3);
    }

    #[test]
    fn malformed_bodies_are_errors() {
        assert!(parse_gfg("<!DOCTYPE html>").is_err());
        assert!(parse_codeforces("").is_err());
        assert!(parse_github("not json").is_err());
    }

    #[test]
    fn cache_round_trips_through_json() {
        let cached = CachedStats {
            snapshot: StatsSnapshot {
                gfg: Some(GfgStats {
                    coding_score: 358,
                    total_solved: 214,
                }),
                codeforces: None,
                github: Some(GithubStats::default()),
            },
            timestamp: 1_700_000_000_000.0,
        };
        let json = serde_json::to_string(&cached).unwrap();
        let back: CachedStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cached);
    }
}
