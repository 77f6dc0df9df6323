pub mod query_builder;
pub mod search_client;

/// Raw shapes of `GET /search/repositories`.
pub(crate) mod search_repo_api_response {
    #[derive(serde::Deserialize, Debug)]
    pub(crate) struct Owner {
        pub(crate) login: String,
        pub(crate) html_url: String,
        pub(crate) avatar_url: String,
    }

    #[derive(serde::Deserialize, Debug)]
    pub(crate) struct Repo {
        pub(crate) name: String,
        pub(crate) description: Option<String>,
        pub(crate) html_url: String,
        pub(crate) stargazers_count: u64,
        pub(crate) forks_count: u64,
        pub(crate) language: Option<String>,
        pub(crate) owner: Owner,
        pub(crate) created_at: String,
        pub(crate) pushed_at: String,
        pub(crate) open_issues: u64,
    }

    #[derive(serde::Deserialize, Debug)]
    pub(crate) struct GetRepoResponse {
        pub(crate) total_count: u64,
        pub(crate) items: Vec<Repo>,
    }
}
