// 목적:
// - tracing 구독자 초기화를 제공한다.
//
// 설명:
// - PG_INT_ARRAY_LOG(없으면 RUST_LOG) 값이 있을 때만 stderr fmt 구독자를 설치한다.
// - 이미 전역 구독자가 있으면(호스트가 먼저 설치한 경우) 조용히 넘어간다.
//
// 참조:
// - src_rs/api/codec_bridge.rs

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PG_INT_ARRAY_LOG";

fn build_filter() -> Option<EnvFilter> {
    if let Ok(value) = std::env::var(LOG_ENV) {
        return Some(EnvFilter::builder().parse_lossy(value));
    }
    if std::env::var("RUST_LOG").is_ok() {
        return Some(EnvFilter::from_default_env());
    }
    None
}

/// 전역 tracing 구독자를 설치한다. 설치했으면 true를 반환한다.
pub fn init_tracing() -> bool {
    let Some(filter) = build_filter() else {
        return false;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
