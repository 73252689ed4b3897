// 실제 DB가 필요하다. PG_INT_ARRAY_TEST_DSN을 설정하고 `cargo test -- --ignored`로 실행한다.

use _pg_int_array::index::postgres_repo::PostgresRepository;
use _pg_int_array::{CoreError, IntArrayField, Record};
use serde_json::json;

const DSN_ENV: &str = "PG_INT_ARRAY_TEST_DSN";

async fn repository(table: &str) -> PostgresRepository {
    let dsn = std::env::var(DSN_ENV)
        .unwrap_or_else(|_| panic!("{}가 설정되지 않았습니다", DSN_ENV));

    let pool = sqlx::PgPool::connect(&dsn).await.unwrap();
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(&format!(
        "CREATE TABLE {} (id bigint PRIMARY KEY, pgarray int[])",
        table
    ))
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(&format!(
        "INSERT INTO {} (id, pgarray) VALUES (1, '{{5,4,79}}'), (2, NULL)",
        table
    ))
    .execute(&pool)
    .await
    .unwrap();

    PostgresRepository::new(
        &dsn,
        table,
        "id",
        vec![IntArrayField::new("pgarray")],
        0,
        2,
        5_000,
        5_000,
    )
    .await
    .unwrap()
}

#[tokio::test]
#[ignore = "PG_INT_ARRAY_TEST_DSN 필요"]
async fn find_decodes_int_array_column() {
    let repository = repository("pg_int_array_find").await;

    let record = repository.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(record.get("pgarray"), Some(&json!([5, 4, 79])));

    let record = repository.find_by_id(2).await.unwrap().unwrap();
    assert_eq!(record.get("pgarray"), Some(&json!(null)));

    assert!(repository.find_by_id(99).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "PG_INT_ARRAY_TEST_DSN 필요"]
async fn update_round_trips_through_database() {
    let repository = repository("pg_int_array_update").await;

    let mut record = Record::new(1).with_field("pgarray", json!([7, 8, 9]));
    assert_eq!(repository.update(&mut record).await.unwrap(), 1);
    assert_eq!(record.get("pgarray"), Some(&json!([7, 8, 9])));

    let reloaded = repository.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(reloaded.get("pgarray"), Some(&json!([7, 8, 9])));
}

#[tokio::test]
#[ignore = "PG_INT_ARRAY_TEST_DSN 필요"]
async fn update_rejects_invalid_record_without_writing() {
    let repository = repository("pg_int_array_invalid").await;

    let mut record = Record::new(1).with_field("pgarray", json!([1, "2"]));
    let error = repository.update(&mut record).await.unwrap_err();
    assert!(matches!(error, CoreError::Validation(_)));
    assert_eq!(record.errors.len(), 1);
    assert_eq!(record.get("pgarray"), Some(&json!([1, "2"])));

    let reloaded = repository.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(reloaded.get("pgarray"), Some(&json!([5, 4, 79])));
}

#[tokio::test]
#[ignore = "PG_INT_ARRAY_TEST_DSN 필요"]
async fn statement_timeout_applies_to_every_pooled_connection() {
    let repository = repository("pg_int_array_timeout").await;

    // 두 연결을 동시에 잡아 풀이 새 연결을 열게 한다.
    let mut first = repository.pool().acquire().await.unwrap();
    let mut second = repository.pool().acquire().await.unwrap();

    for connection in [&mut first, &mut second] {
        let timeout = sqlx::query_scalar::<_, String>("SHOW statement_timeout")
            .fetch_one(&mut **connection)
            .await
            .unwrap();
        assert_eq!(timeout, "5s");
    }
}
