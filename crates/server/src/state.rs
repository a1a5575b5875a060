use campuscompass::{
    config::Config, directions::DirectionsClient, net::HttpFetcher, offline::Manifest,
    offline::Registration, repository::Repository,
};

pub struct AppState {
    pub repository: Repository,
    pub directions: DirectionsClient<Registration<HttpFetcher>>,
    pub manifest: Manifest,
    pub config: Config,
}
