static INIT_ONCE: std::sync::Once = std::sync::Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
/// Safe to call repeatedly; only the first call has an effect.
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

const MIN_WINDOW_LOG: u32 = 10;
const MAX_WINDOW_LOG: u32 = 31;

/// Convert a window size limit in bytes to the decoder's `window_log_max` parameter:
/// floor(log2(bytes)), clamped to what zstd accepts.
/// The limit is rounded down to a power of two, with a 1 KiB floor and a 2 GiB ceiling.
pub fn window_log_for(limit_bytes: u64) -> u32 {
    if limit_bytes == 0 {
        return MIN_WINDOW_LOG;
    }
    let log = u64::BITS - 1 - limit_bytes.leading_zeros();
    log.clamp(MIN_WINDOW_LOG, MAX_WINDOW_LOG)
}
