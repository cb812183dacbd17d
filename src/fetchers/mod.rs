pub mod poster_fetcher;
