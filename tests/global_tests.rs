//! The process-wide registry is shared by every test in this binary, so the
//! whole lifecycle runs as one test.

use easydb::{DbHandle, Error, Purpose};
use serde_json::json;
use tempfile::TempDir;

fn sqlite_dsn(dir: &TempDir, name: &str) -> String {
   format!("{}?mode=rwc", dir.path().join(name).display())
}

#[tokio::test]
async fn test_global_lifecycle() {
   let _ = tracing_subscriber::fmt()
      .with_max_level(tracing::Level::TRACE)
      .with_test_writer()
      .try_init();

   // Before any connect call
   assert!(easydb::choose_connection(Purpose::Select).is_none());
   assert!(matches!(
      easydb::get::<(i64,)>("SELECT 1", vec![]).await,
      Err(Error::NoConnection)
   ));
   assert!(matches!(
      easydb::select::<(i64,)>("SELECT 1", vec![]).await,
      Err(Error::NoConnection)
   ));
   assert!(matches!(
      easydb::query("SELECT 1", vec![]).await,
      Err(Error::NoConnection)
   ));
   assert!(matches!(
      easydb::exec("DELETE FROM t", vec![]).await,
      Err(Error::NoConnection)
   ));
   assert!(matches!(
      easydb::named_exec("DELETE FROM t WHERE id = :id", &json!({"id": 1})).await,
      Err(Error::NoConnection)
   ));
   assert!(matches!(easydb::begin().await, Err(Error::NoConnection)));

   let temp_dir = TempDir::new().unwrap();

   // Master only: reads and writes both use it
   easydb::connect_master("sqlite", &sqlite_dsn(&temp_dir, "master.db"))
      .await
      .unwrap();
   easydb::exec("CREATE TABLE origin (label TEXT)", vec![])
      .await
      .unwrap();
   easydb::exec(
      "INSERT INTO origin (label) VALUES (?)",
      vec![json!("master")],
   )
   .await
   .unwrap();

   let master = easydb::registry().master().unwrap();
   let chosen = easydb::choose_connection(Purpose::Select).unwrap();
   assert!(DbHandle::ptr_eq(&chosen, &master));

   let (label,): (String,) = easydb::get("SELECT label FROM origin", vec![])
      .await
      .unwrap();
   assert_eq!(label, "master");

   // Slave attached: reads move to it, writes stay on the master
   let slave_dsn = sqlite_dsn(&temp_dir, "slave.db");
   {
      let seed = DbHandle::connect("sqlite", &slave_dsn, None).await.unwrap();
      sqlx::query("CREATE TABLE origin (label TEXT)")
         .execute(seed.pool())
         .await
         .unwrap();
      sqlx::query("INSERT INTO origin (label) VALUES ('slave')")
         .execute(seed.pool())
         .await
         .unwrap();
      seed.close().await;
   }
   easydb::connect_slave("sqlite", &slave_dsn).await.unwrap();

   let query = easydb::condition("SELECT label FROM origin /*condition*/", "WHERE label <> ?");
   let labels: Vec<(String,)> = easydb::select(&query, vec![json!("nobody")])
      .await
      .unwrap();
   assert_eq!(labels, vec![("slave".to_string(),)]);

   let result = easydb::named_exec(
      "INSERT INTO origin (label) VALUES (:label)",
      &json!({"label": "second"}),
   )
   .await
   .unwrap();
   assert_eq!(result.rows_affected, 1);

   let mut tx = easydb::begin().await.unwrap();
   let (in_tx,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM origin")
      .fetch_one(&mut *tx)
      .await
      .unwrap();
   assert_eq!(in_tx, 2, "transactions run on the master");
   tx.commit().await.unwrap();

   let rows = easydb::select_maps("SELECT label FROM origin", vec![])
      .await
      .unwrap();
   assert_eq!(rows.len(), 1, "reads still come from the slave");

   easydb::ping().await.unwrap();

   // Closing removes both handles
   easydb::close().await;
   assert!(master.is_closed());
   assert!(easydb::choose_connection(Purpose::Update).is_none());
   assert!(matches!(
      easydb::exec("DELETE FROM origin", vec![]).await,
      Err(Error::NoConnection)
   ));
}
