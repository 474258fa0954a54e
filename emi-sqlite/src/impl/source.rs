use crate::types::{MarketRow, ScheduleRow};
use crate::{Db, Error};
use emi_core::models::{DateRange, Market, MarketRecord, ScheduleKind, ScheduleRecord};
use emi_core::ports::MarketDataSource;

impl MarketDataSource for Db {
    type Error = Error;

    async fn market_records(
        &self,
        range: DateRange,
        market: Option<Market>,
    ) -> Result<Vec<MarketRecord>, Error> {
        let rows: Vec<MarketRow> = sqlx::query_as(
            r#"
            select
                product, timestamp, mcp, mcv
            from
                market_data
            where
                date(timestamp) >= $1
            and
                date(timestamp) <= $2
            and
                ($3 is null or product = $3)
            order by
                timestamp, block_number
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .bind(market.map(|m| m.as_str()))
        .fetch_all(&self.reader)
        .await?;

        rows.into_iter().map(MarketRecord::try_from).collect()
    }

    async fn schedule_records(
        &self,
        kind: ScheduleKind,
        range: DateRange,
        entity: Option<&str>,
    ) -> Result<Vec<ScheduleRecord>, Error> {
        // the two schedule tables are shaped identically modulo names
        let sql = match kind {
            ScheduleKind::Load => {
                r#"
                select
                    discom as entity, date, block_number as block,
                    scheduled_drawal as scheduled, actual_drawal as actual
                from
                    load_schedule
                where
                    date >= $1 and date <= $2 and ($3 is null or discom = $3)
                order by
                    date, block_number
                "#
            }
            ScheduleKind::Generation => {
                r#"
                select
                    generator as entity, date, block_number as block,
                    scheduled_generation as scheduled, actual_generation as actual
                from
                    generation_schedule
                where
                    date >= $1 and date <= $2 and ($3 is null or generator = $3)
                order by
                    date, block_number
                "#
            }
        };

        let rows: Vec<ScheduleRow> = sqlx::query_as(sql)
            .bind(range.start)
            .bind(range.end)
            .bind(entity)
            .fetch_all(&self.reader)
            .await?;

        Ok(rows.into_iter().map(ScheduleRecord::from).collect())
    }
}
