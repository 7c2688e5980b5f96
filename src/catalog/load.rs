// src/catalog/load.rs

use crate::config::StagingConfig;

/// Quote a configuration value as a SQL string literal. COPY options cannot
/// be bound as query parameters, so anything spliced into the statement text
/// goes through here first.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// The two bulk-load statements, one per staging table. Events use the
/// configured JSONPaths file when present (the source field names do not
/// match the column names one-for-one); song metadata is flat enough for
/// auto mapping.
pub fn copy_statements(staging: &StagingConfig) -> Vec<String> {
    let credentials = quote_literal(&format!("aws_iam_role={}", staging.iam_role));
    let events_format = match &staging.log_jsonpath {
        Some(path) => quote_literal(path),
        None => "'auto'".to_string(),
    };

    vec![
        format!(
            "COPY staging_events FROM {}\n    credentials {}\n    format as json {}",
            quote_literal(&staging.log_data),
            credentials,
            events_format,
        ),
        format!(
            "COPY staging_songs FROM {}\n    credentials {}\n    format as json 'auto'",
            quote_literal(&staging.song_data),
            credentials,
        ),
    ]
}

/// The five transform statements. Every one reads only from the staging
/// tables, so their relative order is free; the fact insert is listed first
/// to mirror the load's logical shape (fact from the join, dimensions from
/// projections).
pub fn insert_statements() -> Vec<&'static str> {
    vec![
        SONGPLAY_INSERT,
        USER_INSERT,
        SONG_INSERT,
        ARTIST_INSERT,
        TIME_INSERT,
    ]
}

/// Fact table: one row per 'NextSong' event that matches a known song by
/// artist name and title. The inner join silently excludes events with no
/// matching song metadata rather than inserting nulls.
const SONGPLAY_INSERT: &str = r#"
    INSERT INTO songplays (
        start_time, user_id, level, song_id, artist_id, session_id, location, user_agent
    )
    SELECT
        TO_TIMESTAMP(se.ts) AS start_time,
        se.userId AS user_id,
        se.level AS level,
        ss.song_id AS song_id,
        ss.artist_id AS artist_id,
        se.sessionId AS session_id,
        se.location AS location,
        se.userAgent AS user_agent
    FROM staging_events se
    JOIN staging_songs ss
        ON ss.artist_name = se.artist AND ss.title = se.song
    WHERE se.page = 'NextSong'
"#;

/// Users dimension: for each user, the attributes from their most recent
/// 'NextSong' event, so the latest known level wins.
const USER_INSERT: &str = r#"
    INSERT INTO users (
        user_id, first_name, last_name, gender, level
    )
    SELECT DISTINCT
        se.userId AS user_id,
        se.firstName AS first_name,
        se.lastName AS last_name,
        se.gender AS gender,
        se.level AS level
    FROM staging_events se
    JOIN (
        SELECT userId, MAX(ts) AS ts
        FROM staging_events
        WHERE page = 'NextSong' AND userId IS NOT NULL
        GROUP BY userId
    ) latest
        ON se.userId = latest.userId AND se.ts = latest.ts
    WHERE se.page = 'NextSong'
"#;

const SONG_INSERT: &str = r#"
    INSERT INTO songs (
        song_id, title, artist_id, year, duration
    )
    SELECT DISTINCT
        song_id,
        title,
        artist_id,
        year,
        duration
    FROM staging_songs
"#;

const ARTIST_INSERT: &str = r#"
    INSERT INTO artists (
        artist_id, name, location, latitude, longitude
    )
    SELECT DISTINCT
        artist_id,
        artist_name,
        artist_location,
        artist_latitude,
        artist_longitude
    FROM staging_songs
"#;

/// Time dimension: calendar breakdown of every distinct 'NextSong'
/// timestamp. DISTINCT is the dedup policy here: two events sharing an epoch
/// timestamp produce one row, and the primary key never trips within a run.
const TIME_INSERT: &str = r#"
    INSERT INTO time (
        start_time, hour, day, week, month, year, weekday
    )
    SELECT
        t_stamp.start_time,
        EXTRACT(hour FROM t_stamp.start_time),
        EXTRACT(day FROM t_stamp.start_time),
        EXTRACT(week FROM t_stamp.start_time),
        EXTRACT(month FROM t_stamp.start_time),
        EXTRACT(year FROM t_stamp.start_time),
        EXTRACT(dow FROM t_stamp.start_time)
    FROM (
        SELECT DISTINCT TO_TIMESTAMP(ts) AS start_time
        FROM staging_events
        WHERE page = 'NextSong'
    ) t_stamp
"#;
