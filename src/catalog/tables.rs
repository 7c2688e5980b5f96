// src/catalog/tables.rs

/// One warehouse relation: its name plus the CREATE TABLE text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub create: &'static str,
}

/// All seven relations, in creation order: staging tables first (nothing
/// depends on them), then dimensions with artists ahead of songs (songs
/// references artists), and the fact table last since it references every
/// dimension.
pub static TABLES: &[Table] = &[
    Table {
        name: "staging_events",
        create: r#"
            CREATE TABLE IF NOT EXISTS staging_events (
                artist varchar,
                auth varchar NOT NULL,
                firstName varchar,
                gender char(1),
                itemInSession int NOT NULL,
                lastName varchar,
                length numeric,
                level varchar NOT NULL,
                location varchar,
                method varchar NOT NULL,
                page varchar NOT NULL,
                registration numeric,
                sessionId int NOT NULL,
                song varchar,
                status int NOT NULL,
                ts numeric NOT NULL,
                userAgent varchar,
                userId int
            )
        "#,
    },
    Table {
        name: "staging_songs",
        create: r#"
            CREATE TABLE IF NOT EXISTS staging_songs (
                num_songs int NOT NULL,
                artist_id varchar NOT NULL,
                artist_latitude numeric,
                artist_longitude numeric,
                artist_location varchar,
                artist_name varchar NOT NULL,
                song_id varchar NOT NULL,
                title varchar NOT NULL,
                duration numeric NOT NULL,
                year int NOT NULL
            )
        "#,
    },
    Table {
        name: "users",
        create: r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id int PRIMARY KEY,
                first_name varchar,
                last_name varchar,
                gender char(1),
                level varchar
            )
        "#,
    },
    Table {
        name: "artists",
        create: r#"
            CREATE TABLE IF NOT EXISTS artists (
                artist_id varchar PRIMARY KEY,
                name varchar,
                location varchar,
                latitude numeric,
                longitude numeric
            )
        "#,
    },
    Table {
        name: "songs",
        create: r#"
            CREATE TABLE IF NOT EXISTS songs (
                song_id varchar PRIMARY KEY,
                title varchar,
                artist_id varchar NOT NULL,
                year int,
                duration numeric,
                CONSTRAINT fk_artist_id
                    FOREIGN KEY (artist_id)
                    REFERENCES artists (artist_id)
                    ON DELETE CASCADE
            )
        "#,
    },
    Table {
        name: "time",
        create: r#"
            CREATE TABLE IF NOT EXISTS time (
                start_time timestamp PRIMARY KEY,
                hour int,
                day int,
                week int,
                month int,
                year int,
                weekday int
            )
        "#,
    },
    Table {
        name: "songplays",
        create: r#"
            CREATE TABLE IF NOT EXISTS songplays (
                songplay_id int IDENTITY(0,1) PRIMARY KEY,
                start_time timestamp,
                user_id int NOT NULL,
                level varchar,
                song_id varchar,
                artist_id varchar,
                session_id int NOT NULL,
                location varchar,
                user_agent varchar,
                UNIQUE (start_time, user_id),
                CONSTRAINT fk_song_id
                    FOREIGN KEY (song_id)
                    REFERENCES songs (song_id)
                    ON DELETE CASCADE,
                CONSTRAINT fk_artist_id
                    FOREIGN KEY (artist_id)
                    REFERENCES artists (artist_id)
                    ON DELETE CASCADE,
                CONSTRAINT fk_user_id
                    FOREIGN KEY (user_id)
                    REFERENCES users (user_id)
                    ON DELETE CASCADE,
                CONSTRAINT fk_start_time
                    FOREIGN KEY (start_time)
                    REFERENCES time (start_time)
                    ON DELETE CASCADE
            )
        "#,
    },
];

/// DROP statements, one per table. Order does not matter: CASCADE takes any
/// dependent constraints with it.
pub fn drop_statements() -> Vec<String> {
    TABLES
        .iter()
        .map(|t| format!("DROP TABLE IF EXISTS {} CASCADE", t.name))
        .collect()
}

/// CREATE statements in dependency order.
pub fn create_statements() -> Vec<&'static str> {
    TABLES.iter().map(|t| t.create).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(name: &str) -> usize {
        TABLES
            .iter()
            .position(|t| t.name == name)
            .unwrap_or_else(|| panic!("table {name} missing from catalog"))
    }

    #[test]
    fn catalog_has_all_seven_tables() {
        let names: Vec<_> = TABLES.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            [
                "staging_events",
                "staging_songs",
                "users",
                "artists",
                "songs",
                "time",
                "songplays"
            ]
        );
    }

    #[test]
    fn referenced_tables_created_before_referencing() {
        // songs FK-references artists; songplays references all four dims.
        assert!(position("artists") < position("songs"));
        for dim in ["users", "songs", "artists", "time"] {
            assert!(position(dim) < position("songplays"));
        }
    }

    #[test]
    fn staging_tables_come_first() {
        assert_eq!(position("staging_events"), 0);
        assert_eq!(position("staging_songs"), 1);
    }

    #[test]
    fn drops_cover_every_table_and_tolerate_absence() {
        let drops = drop_statements();
        assert_eq!(drops.len(), TABLES.len());
        for (drop, table) in drops.iter().zip(TABLES) {
            assert!(drop.starts_with("DROP TABLE IF EXISTS"));
            assert!(drop.contains(table.name));
        }
    }

    #[test]
    fn every_create_is_guarded_and_names_its_table() {
        for table in TABLES {
            assert!(table.create.contains("CREATE TABLE IF NOT EXISTS"));
            assert!(table.create.contains(table.name));
        }
    }
}
