use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use marquee_core::config::SearchConfig;
use marquee_core::error::{FETCH_FAILED_MESSAGE, NOT_FOUND_MESSAGE};
use marquee_core::{SearchController, SearchPhase, SearchState};

mod support;

use support::catalog::{ScriptedCatalog, hit, matrix_catalog};

const DEBOUNCE: Duration = Duration::from_millis(350);

fn controller(catalog: Arc<ScriptedCatalog>) -> SearchController {
    SearchController::new(catalog, SearchConfig::default(), Duration::from_secs(10))
}

async fn settled(search: &SearchController) -> Result<SearchState> {
    let mut rx = search.subscribe();
    let state = rx.wait_for(SearchState::is_settled).await?.clone();
    Ok(state)
}

#[tokio::test(start_paused = true)]
async fn typing_a_title_fetches_once() -> Result<()> {
    support::init_tracing();
    let catalog = Arc::new(matrix_catalog());
    let mut search = controller(catalog.clone());

    let mut typed = String::new();
    for ch in "matrix".chars() {
        typed.push(ch);
        search.set_query(typed.clone());
        tokio::time::sleep(Duration::from_millis(120)).await;
    }

    let state = settled(&search).await?;
    assert_eq!(catalog.calls(), vec!["s:matrix"]);
    assert_eq!(state.result_count(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn pausing_between_words_fetches_each_settled_query() -> Result<()> {
    let catalog = Arc::new(
        matrix_catalog().search("alien", 10, vec![hit("tt0078748", "Alien", "1979")]),
    );
    let mut search = controller(catalog.clone());

    search.set_query("alien");
    settled(&search).await?;
    search.set_query("matrix");
    let state = settled(&search).await?;

    assert_eq!(catalog.calls(), vec!["s:alien", "s:matrix"]);
    assert_eq!(state.query, "matrix");
    assert_eq!(state.result_count(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn late_response_for_earlier_query_is_ignored() -> Result<()> {
    let catalog = Arc::new(
        ScriptedCatalog::new()
            .search("matrix", 3_000, vec![hit("tt0133093", "The Matrix", "1999")])
            .search("alien", 100, vec![hit("tt0078748", "Alien", "1979")]),
    );
    let mut search = controller(catalog.clone());
    let mut rx = search.subscribe();

    search.set_query("matrix");
    tokio::time::sleep(DEBOUNCE + Duration::from_millis(50)).await;
    search.set_query("alien");

    let state = settled(&search).await?;
    assert_eq!(state.results[0].title, "Alien");

    rx.mark_unchanged();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(!rx.has_changed()?);
    assert_eq!(search.snapshot().results[0].title, "Alien");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn failures_surface_one_message_and_recover() -> Result<()> {
    let catalog = Arc::new(matrix_catalog().failing_search("broken", 500));
    let mut search = controller(catalog);

    search.set_query("broken");
    let state = settled(&search).await?;
    assert_eq!(state.phase, SearchPhase::Failed);
    assert_eq!(state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));

    search.set_query("nothing here");
    let state = settled(&search).await?;
    assert_eq!(state.error.as_deref(), Some(NOT_FOUND_MESSAGE));

    search.set_query("matrix");
    let state = settled(&search).await?;
    assert_eq!(state.phase, SearchPhase::Succeeded);
    assert_eq!(state.error, None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn independent_controllers_share_one_catalog() -> Result<()> {
    let catalog = Arc::new(
        matrix_catalog().search("alien", 10, vec![hit("tt0078748", "Alien", "1979")]),
    );
    let mut left = controller(catalog.clone());
    let mut right = controller(catalog.clone());

    left.set_query("matrix");
    right.set_query("alien");
    let (left_state, right_state) = futures::try_join!(settled(&left), settled(&right))?;

    assert_eq!(left_state.result_count(), 2);
    assert_eq!(right_state.result_count(), 1);
    assert_eq!(catalog.search_count(), 2);
    Ok(())
}
