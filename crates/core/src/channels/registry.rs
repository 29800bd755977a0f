//! Static list of the channels the backend curates.

use crate::channels::channels_model::NewChannel;

/// Most traded US stocks as `(ticker, company name)`, in display order.
pub const STOCK_CHANNELS: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("TSLA", "Tesla Inc."),
    ("META", "Meta Platforms Inc."),
    ("BRK.B", "Berkshire Hathaway Inc."),
    ("JPM", "JPMorgan Chase & Co."),
    ("V", "Visa Inc."),
    ("JNJ", "Johnson & Johnson"),
    ("WMT", "Walmart Inc."),
    ("PG", "Procter & Gamble Co."),
    ("MA", "Mastercard Inc."),
    ("HD", "Home Depot Inc."),
    ("DIS", "Walt Disney Co."),
    ("BAC", "Bank of America Corp."),
    ("CSCO", "Cisco Systems Inc."),
    ("ADBE", "Adobe Inc."),
    ("NFLX", "Netflix Inc."),
    ("CRM", "Salesforce Inc."),
    ("PFE", "Pfizer Inc."),
    ("TMO", "Thermo Fisher Scientific"),
    ("INTC", "Intel Corporation"),
    ("CMCSA", "Comcast Corporation"),
    ("VZ", "Verizon Communications"),
    ("AMD", "Advanced Micro Devices"),
    ("T", "AT&T Inc."),
    ("ORCL", "Oracle Corporation"),
    ("NKE", "Nike Inc."),
    ("PYPL", "PayPal Holdings Inc."),
    ("COIN", "Coinbase Global Inc."),
    ("BA", "Boeing Co."),
    ("IBM", "IBM Corporation"),
    ("GE", "General Electric Co."),
    ("F", "Ford Motor Co."),
    ("GM", "General Motors Co."),
    ("UBER", "Uber Technologies Inc."),
    ("LYFT", "Lyft Inc."),
    ("SNAP", "Snap Inc."),
    ("SQ", "Block Inc."),
    ("ROKU", "Roku Inc."),
    ("SPOT", "Spotify Technology"),
    ("ZM", "Zoom Video Communications"),
    ("SHOP", "Shopify Inc."),
    ("PLTR", "Palantir Technologies"),
    ("RBLX", "Roblox Corporation"),
    ("RIVN", "Rivian Automotive Inc."),
    ("LCID", "Lucid Group Inc."),
    ("NIO", "NIO Inc."),
];

/// The static list as seedable channels, numbered from 1.
pub fn default_channels() -> Vec<NewChannel> {
    STOCK_CHANNELS
        .iter()
        .enumerate()
        .map(|(idx, (ticker, company_name))| NewChannel {
            ticker: ticker.to_string(),
            company_name: company_name.to_string(),
            channel_number: idx as i32 + 1,
        })
        .collect()
}
