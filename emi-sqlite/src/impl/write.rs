use crate::types::{NewMarketRecord, NewScheduleRecord};
use crate::{Db, Error};
use emi_core::models::ScheduleKind;

impl Db {
    /// Insert market clearing observations, skipping duplicates.
    ///
    /// A duplicate is a row with the same (product, timestamp, block);
    /// re-seeding the same window is therefore idempotent. Returns the
    /// number of rows actually inserted.
    pub async fn insert_market_records(&self, records: &[NewMarketRecord]) -> Result<u64, Error> {
        let mut tx = self.writer.begin().await?;
        let mut inserted = 0;
        for record in records {
            let result = sqlx::query(
                r#"
                insert into
                    market_data (product, timestamp, block_number, mcp, mcv)
                values
                    ($1, $2, $3, $4, $5)
                on conflict
                    do nothing
                "#,
            )
            .bind(record.market.as_str())
            .bind(record.timestamp)
            .bind(record.block)
            .bind(record.mcp)
            .bind(record.mcv)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }

    /// Insert load or generation schedule entries, skipping duplicates.
    ///
    /// Returns the number of rows actually inserted.
    pub async fn insert_schedule_records(
        &self,
        kind: ScheduleKind,
        records: &[NewScheduleRecord],
    ) -> Result<u64, Error> {
        let sql = match kind {
            ScheduleKind::Load => {
                r#"
                insert into
                    load_schedule (discom, date, block_number, scheduled_drawal, actual_drawal)
                values
                    ($1, $2, $3, $4, $5)
                on conflict
                    do nothing
                "#
            }
            ScheduleKind::Generation => {
                r#"
                insert into
                    generation_schedule
                    (generator, date, block_number, scheduled_generation, actual_generation)
                values
                    ($1, $2, $3, $4, $5)
                on conflict
                    do nothing
                "#
            }
        };

        let mut tx = self.writer.begin().await?;
        let mut inserted = 0;
        for record in records {
            let result = sqlx::query(sql)
                .bind(&record.entity)
                .bind(record.date)
                .bind(record.block)
                .bind(record.scheduled)
                .bind(record.actual)
                .execute(&mut *tx)
                .await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
