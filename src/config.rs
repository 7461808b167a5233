//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 데이터베이스 접속 설정을 읽어옵니다.
//! `.env` 파일은 바이너리 시작 시 `dotenvy`가 먼저 로딩합니다.
//!
//! 설정 항목:
//! - `DATA_TYPE`: 데이터베이스 종류 (기본값: "sqlite")
//! - `DATA_USER`: 접속 사용자 (기본값: 빈 문자열)
//! - `DATA_PASSWORD`: 접속 비밀번호 (기본값: 빈 문자열)
//! - `DATA_TABLE`: 데이터베이스(스키마) 이름 (기본값: "article_system")
//! - `DATA_ADDRESS`: 호스트 주소 (기본값: "localhost")
//! - `DATA_PORT`: 포트 번호. 없거나 "none"이거나 숫자가 아니면 미지정으로 취급합니다.

// std::env: 프로세스 환경변수 접근
use std::env;
// Duration: 시간 길이를 나타내는 표준 타입 (연결 재활용 주기에 사용)
use std::time::Duration;

/// 파일 기반 단일 파일 엔진의 종류 이름
pub const SQLITE_KIND: &str = "sqlite";

/// 데이터베이스 접속 설정
///
/// 시작 시 한 번 읽어서 `db::connect`에 넘깁니다.
/// 전역 상태가 아니므로 테스트마다 독립된 인스턴스를 만들 수 있습니다.
// - Debug: {:?}로 출력 가능 (password도 그대로 보이므로 로그에는 redacted_url()을 사용)
// - Clone: 설정을 복제해 여러 곳에 넘길 수 있음
#[derive(Debug, Clone)]
pub struct Config {
    /// 데이터베이스 종류 (소문자로 정규화됨, 예: "sqlite", "mysql", "postgres")
    pub kind: String,
    pub user: String,
    pub password: String,
    /// 데이터베이스(스키마) 이름. SQLite에서는 파일 이름이 됩니다.
    pub schema: String,
    pub host: String,
    /// 포트 번호. None이면 연결 문자열에서 포트 구간을 생략합니다.
    /// u16: 0~65535 범위. 이 범위를 벗어난 값("70000")은 파싱 단계에서 None이 됩니다.
    pub port: Option<u16>,
    /// 연결 풀 설정
    pub pool: PoolSettings,
}

/// 연결 풀 크기와 재활용 정책
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// 항상 유지하는 기본 연결 수
    pub size: u32,
    /// 기본 연결 수를 넘어 추가로 열 수 있는 연결 수
    pub max_overflow: u32,
    /// 이 시간이 지난 연결은 닫고 새로 엽니다.
    pub recycle: Duration,
    /// 풀에서 꺼낼 때마다 연결 상태를 확인할지 여부
    pub pre_ping: bool,
}

// Default 트레이트: `PoolSettings::default()`로 기본값 인스턴스를 만듭니다.
// 기본 10개 + 초과 20개 = 최대 30개, 1시간마다 재활용, 꺼낼 때마다 상태 확인
impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            size: 10,
            max_overflow: 20,
            recycle: Duration::from_secs(3600),
            pre_ping: true,
        }
    }
}

impl PoolSettings {
    /// 동시에 열 수 있는 최대 연결 수 (기본 + 초과분)
    pub fn max_connections(&self) -> u32 {
        // saturating_add: u32 범위를 넘으면 최댓값에서 멈춤 (오버플로 패닉 방지)
        self.size.saturating_add(self.max_overflow)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kind: SQLITE_KIND.to_string(),
            user: String::new(),
            password: String::new(),
            schema: "article_system".to_string(),
            host: "localhost".to_string(),
            port: None,
            pool: PoolSettings::default(),
        }
    }
}

impl Config {
    /// 프로세스 환경변수에서 설정을 읽습니다.
    ///
    /// 모든 항목에 기본값이 있으므로 실패하지 않습니다.
    pub fn from_env() -> Self {
        // env::var()는 Result<String, VarError>를 돌려줍니다.
        // .ok()로 Option으로 바꿔, 변수가 없거나 UTF-8이 아니면 None(기본값 사용)으로 취급합니다.
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정을 읽습니다.
    ///
    /// `from_env`의 실제 구현이며, 테스트에서는 HashMap 등을 넘겨
    /// 프로세스 환경변수를 건드리지 않고 검증합니다.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // ── 1단계: 기본값 준비 ──
        // 환경변수가 없는 항목은 이 값의 필드를 그대로 가져갑니다. (move)
        let defaults = Self::default();

        // ── 2단계: 항목별로 조회하고 없으면 기본값 ──
        // unwrap_or(x): Option이 None이면 x를 사용
        Self {
            // 종류 이름은 소문자로 정규화합니다. ("SQLite" → "sqlite")
            kind: lookup("DATA_TYPE")
                .map(|kind| kind.to_lowercase())
                .unwrap_or(defaults.kind),
            user: lookup("DATA_USER").unwrap_or(defaults.user),
            password: lookup("DATA_PASSWORD").unwrap_or(defaults.password),
            schema: lookup("DATA_TABLE").unwrap_or(defaults.schema),
            host: lookup("DATA_ADDRESS").unwrap_or(defaults.host),
            // ── 3단계: 포트 해석 ──
            // as_deref(): Option<String> → Option<&str>
            // and_then(): 값이 있을 때만 parse_port를 호출하고, 그 결과(Option)를 그대로 사용
            port: lookup("DATA_PORT").as_deref().and_then(parse_port),
            // 풀 설정은 환경변수로 바꾸지 않습니다.
            pool: defaults.pool,
        }
    }

    /// 파일 기반 엔진(SQLite)인지 여부
    pub fn is_sqlite(&self) -> bool {
        self.kind.eq_ignore_ascii_case(SQLITE_KIND)
    }

    /// 연결 문자열을 만듭니다.
    ///
    /// - SQLite: `sqlite://<schema>.db`
    /// - 그 외: `<kind>://<user>:<password>@<host>[:<port>]/<schema>`
    pub fn database_url(&self) -> String {
        self.build_url(&self.password)
    }

    /// 비밀번호를 가린 연결 문자열 (로그 출력용)
    pub fn redacted_url(&self) -> String {
        if self.password.is_empty() {
            self.build_url("")
        } else {
            self.build_url("***")
        }
    }

    fn build_url(&self, password: &str) -> String {
        // SQLite는 로컬 파일이므로 사용자/비밀번호/호스트/포트를 쓰지 않습니다.
        // 파일이 없으면 db::connect가 새로 만듭니다.
        if self.is_sqlite() {
            return format!("{}://{}.db", SQLITE_KIND, self.schema);
        }

        // 포트가 지정된 경우에만 `:<port>` 구간을 붙입니다.
        match self.port {
            Some(port) => format!(
                "{}://{}:{}@{}:{}/{}",
                self.kind, self.user, password, self.host, port, self.schema
            ),
            None => format!(
                "{}://{}:{}@{}/{}",
                self.kind, self.user, password, self.host, self.schema
            ),
        }
    }
}

/// `DATA_PORT` 값을 해석합니다. "none"(대소문자 무시)이나 숫자가 아닌 값은 None.
fn parse_port(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return None;
    }
    // .parse::<u16>()가 실패하면(문자, 음수, 65535 초과) 에러 대신 None
    raw.parse().ok()
}
