pub mod review_feed;

pub use review_feed::ReviewFeed;
