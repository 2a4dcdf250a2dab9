/// Timestamped progress logging, similar to `info!` in tracing.
/// Optionally pass a starting time as the first argument and it will also
/// print how long it took from that time to now.
/// ```
/// # use chrono::Local;
/// # use flyttdata::info_time;
/// info_time!("Page {}/{}", 1, 24);
/// let time = Local::now();
/// info_time!(time, "Page {}/{}", 1, 24);
/// ```
#[macro_export]
macro_rules! info_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        let local_now = Local::now();
        println!("{:<30} : {}", local_now, format!($strfm, $($arg),*));
    }};
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let local_now = Local::now();
        let run_time = (local_now - $time)
                .num_microseconds()
                .map(|n| n as f64 / 1_000_000.0)
                .unwrap_or(0.0);
        println!(
            "{:<30} : {}\nRUNTIME: {} sec",
            local_now,
            format!($strfm, $($arg),*),
            run_time
        );
    }};
}
