//! End-to-end runs through the worker, the store and the in-memory gateway.

use std::sync::Arc;

use userdeck::app::form::UserForm;
use userdeck::app::{handle_event, AppState, DirectoryState, Event, Store, Transition};
use userdeck::domain::{Organization, User, UserId, UserInput};
use userdeck::gateway::InMemoryGateway;
use userdeck::pipeline::{FilterPatch, PaginationPatch, SortDirection, SortSpec};
use userdeck::worker::{DirectoryWorker, WorkerMessage, WorkerResponse};
use userdeck::Theme;

fn directory(count: i64) -> Vec<User> {
    (1..=count)
        .map(|id| {
            let company = if id % 8 == 0 { "Acme Corp" } else { "Globex" };
            User::from_input(
                UserId::Number(id),
                &UserInput {
                    name: format!("User {id:02}"),
                    username: Some(format!("user{id}")),
                    email: format!("user{id}@example.com"),
                    phone: format!("555-01{id:02}"),
                    website: "example.com".into(),
                    organization: Some(Organization::named(company)),
                    ..UserInput::default()
                },
            )
        })
        .collect()
}

async fn loaded_worker(count: i64) -> DirectoryWorker {
    let gateway = Arc::new(InMemoryGateway::new(directory(count)));
    let worker = DirectoryWorker::new(Store::new(DirectoryState::with_page_size(10)), gateway);
    let response = worker.handle_message(WorkerMessage::load_users()).await;
    assert_eq!(response, WorkerResponse::UsersLoaded { count: count as usize });
    worker
}

#[tokio::test]
async fn first_page_of_twenty_five() {
    let worker = loaded_worker(25).await;
    let view = worker.store().read(DirectoryState::view);

    let ids: Vec<UserId> = view.rows.iter().map(|u| u.id.clone()).collect();
    assert_eq!(ids, (1..=10).map(UserId::Number).collect::<Vec<_>>());
    assert_eq!(view.total_filtered, 25);
    assert_eq!(view.summary().as_deref(), Some("Showing 1 to 10 of 25 results"));
}

#[tokio::test]
async fn company_filter_resets_to_first_page() {
    let worker = loaded_worker(25).await;
    let store = worker.store();
    store.dispatch(Transition::PaginationChanged(PaginationPatch::page(3)));
    assert_eq!(store.read(|s| s.pagination.current_page), 3);

    store.dispatch(Transition::FiltersChanged(FilterPatch::company("Acme")));
    let view = store.read(DirectoryState::view);

    assert_eq!(view.current_page, 1);
    assert_eq!(view.total_filtered, 3);
    assert_eq!(view.rows.len(), 3);
    assert!(view.rows.iter().all(|u| u.organization_name() == Some("Acme Corp")));
}

#[tokio::test]
async fn sorting_twice_by_name_reverses() {
    let worker = loaded_worker(25).await;
    let mut state = AppState::new(worker.store().clone(), Theme::default());

    handle_event(&mut state, &Event::SortBy(userdeck::app::Column::Name)).unwrap();
    assert_eq!(state.store.read(|s| s.sort.clone()), SortSpec::by("name", SortDirection::Ascending));

    handle_event(&mut state, &Event::SortBy(userdeck::app::Column::Name)).unwrap();
    assert_eq!(state.store.read(|s| s.sort.clone()), SortSpec::by("name", SortDirection::Descending));
    assert_eq!(state.view().rows[0].name, "User 25");
}

#[tokio::test]
async fn created_record_goes_first() {
    let worker = loaded_worker(25).await;
    let store = worker.store();
    let created = User::from_input(
        UserId::Number(99),
        &UserInput { name: "X".into(), ..UserInput::default() },
    );

    store.dispatch(Transition::RecordCreated(created));

    let snapshot = store.snapshot();
    assert_eq!(snapshot.records.len(), 26);
    assert_eq!(snapshot.records[0].id, UserId::Number(99));
    assert_eq!(snapshot.pagination.total_items, 26);
}

#[tokio::test]
async fn rejected_update_leaves_collection_alone() {
    let worker = loaded_worker(25).await;
    let before = worker.store().snapshot().records;

    let response = worker
        .handle_message(WorkerMessage::update_user(
            UserId::Number(404),
            UserInput {
                name: "Nobody".into(),
                email: "nobody@example.com".into(),
                phone: "555-0000".into(),
                website: "example.com".into(),
                ..UserInput::default()
            },
        ))
        .await;

    let after = worker.store().snapshot();
    assert!(matches!(response, WorkerResponse::Failed { .. }));
    assert_eq!(after.error(), Some("User 404 not found"));
    assert_eq!(after.records, before);
    assert!(!after.is_loading());
}

#[tokio::test]
async fn offline_sample_loads_through_spawned_task() {
    let gateway = Arc::new(InMemoryGateway::sample().unwrap());
    let worker = DirectoryWorker::new(Store::default(), gateway);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    worker.spawn(WorkerMessage::load_users(), tx).await.unwrap();

    assert!(matches!(rx.recv().await, Some(WorkerResponse::UsersLoaded { .. })));
    assert!(worker.store().read(|s| s.total_filtered()) > 0);
}

#[tokio::test]
async fn editing_without_changes_keeps_the_whole_record() {
    let gateway = Arc::new(InMemoryGateway::sample().unwrap());
    let worker = DirectoryWorker::new(Store::default(), gateway);
    worker.handle_message(WorkerMessage::load_users()).await;

    let id = UserId::Number(1);
    let find = |state: &DirectoryState| state.records.iter().find(|u| u.id == id).cloned();
    let before = worker.store().read(find).unwrap();

    let input = UserForm::edit(&before).submit().unwrap();
    worker.handle_message(WorkerMessage::update_user(id.clone(), input)).await;

    let after = worker.store().read(find).unwrap();
    assert_eq!(after, before);
    assert!(after.extra.contains_key("address"));
    assert!(after.organization.and_then(|o| o.catch_phrase).is_some());
}
