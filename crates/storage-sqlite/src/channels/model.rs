//! Database models for channels.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use miltontv_core::channels::{Channel, NewChannel};

/// Database model for channels
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::channels)]
#[diesel(primary_key(ticker))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChannelDB {
    pub ticker: String,
    pub company_name: String,
    pub channel_number: i32,
    pub created_at: NaiveDateTime,
}

/// Database model for seeding a channel
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::channels)]
pub struct NewChannelDB {
    pub ticker: String,
    pub company_name: String,
    pub channel_number: i32,
    pub created_at: NaiveDateTime,
}

impl From<ChannelDB> for Channel {
    fn from(db: ChannelDB) -> Self {
        Self {
            ticker: db.ticker,
            company_name: db.company_name,
            channel_number: db.channel_number,
            created_at: db.created_at,
        }
    }
}

impl NewChannelDB {
    pub fn from_domain(channel: NewChannel, created_at: NaiveDateTime) -> Self {
        Self {
            ticker: channel.ticker,
            company_name: channel.company_name,
            channel_number: channel.channel_number,
            created_at,
        }
    }
}
