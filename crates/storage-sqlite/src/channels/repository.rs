use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use miltontv_core::channels::{Channel, ChannelRepositoryTrait, NewChannel};
use miltontv_core::Result;

use super::model::{ChannelDB, NewChannelDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::channels;
use crate::schema::channels::dsl::*;

pub struct ChannelRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ChannelRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ChannelRepository { pool, writer }
    }
}

#[async_trait]
impl ChannelRepositoryTrait for ChannelRepository {
    fn list_channels(&self) -> Result<Vec<Channel>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = channels
            .order(channel_number.asc())
            .select(ChannelDB::as_select())
            .load::<ChannelDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Channel::from).collect())
    }

    fn get_channel(&self, ticker_value: &str) -> Result<Option<Channel>> {
        let mut conn = get_connection(&self.pool)?;
        let row = channels
            .find(ticker_value)
            .select(ChannelDB::as_select())
            .first::<ChannelDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Channel::from))
    }

    fn count_channels(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(channels
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }

    async fn insert_channels(&self, new_channels: Vec<NewChannel>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let now = Utc::now().naive_utc();
                let rows: Vec<NewChannelDB> = new_channels
                    .into_iter()
                    .map(|c| NewChannelDB::from_domain(c, now))
                    .collect();
                Ok(diesel::insert_into(channels::table)
                    .values(&rows)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
