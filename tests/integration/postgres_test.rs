//! Store and service tests against PostgreSQL.
//!
//! Each test returns early when `DATABASE_URL` is not set.

use dirhub_core::error::ErrorKind;
use dirhub_core::types::{DirectoryId, UserId};
use dirhub_database::store::{DirectoryStore, UnitOfWork};
use dirhub_entity::directory::CreateDirectory;
use dirhub_service::{CreateDirectoryRequest, RenameDirectoryRequest, UserAuthority};

use crate::helpers::PgHarness;

macro_rules! harness_or_skip {
    () => {
        match PgHarness::connect().await {
            Some(pg) => pg,
            None => {
                eprintln!("DATABASE_URL not set, skipping");
                return;
            }
        }
    };
}

async fn child_named(pg: &PgHarness, parent: DirectoryId, name: &str) -> DirectoryId {
    pg.service
        .list_children(parent)
        .await
        .expect("list children")
        .into_iter()
        .find(|d| d.name == name)
        .map(|d| d.id)
        .expect("child present")
}

#[tokio::test]
async fn test_pg_remove_cascades_through_subtree() {
    let pg = harness_or_skip!();
    let user = pg.add_user().await;

    let root = pg
        .service
        .create_root(CreateDirectoryRequest::new("Root"))
        .await
        .expect("root");
    pg.service
        .create(CreateDirectoryRequest::new("Child"), root.id)
        .await
        .expect("child");
    let child = child_named(&pg, root.id, "Child").await;
    pg.service
        .create(CreateDirectoryRequest::new("Grandchild"), child)
        .await
        .expect("grandchild");
    let grandchild = child_named(&pg, child, "Grandchild").await;

    let document = pg.add_document(grandchild).await;
    pg.service
        .assign_authority(&[UserAuthority { user_id: user }], grandchild)
        .await
        .expect("assign");

    pg.service.remove(child).await.expect("remove");

    assert!(pg.service.get(child).await.unwrap_err().is_not_found());
    assert!(pg.service.get(grandchild).await.unwrap_err().is_not_found());
    assert!(pg.service.list_children(root.id).await.expect("children").is_empty());
    assert!(pg.directory_deleted(grandchild).await);
    assert!(!pg.directory_deleted(root.id).await);
    assert!(pg.document_deleted(document).await);
    assert_eq!(pg.grant_rows(grandchild).await, 0);
    assert!(
        pg.service
            .list_authority_directories_for_user(user)
            .await
            .expect("grants")
            .is_empty()
    );

    let again = pg.service.remove(child).await.unwrap_err();
    assert_eq!(again.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_pg_second_live_project_directory_is_conflict() {
    let pg = harness_or_skip!();
    let project = pg.add_project().await;

    let mut work = pg.store.begin().await.expect("begin");
    let root = work
        .insert_directory(&CreateDirectory::root("Root"))
        .await
        .expect("root");
    work.insert_directory(&CreateDirectory::new("First", root.id, Some(project), None))
        .await
        .expect("first");

    let err = work
        .insert_directory(&CreateDirectory::new("Second", root.id, Some(project), None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    work.rollback().await.expect("rollback");
}

#[tokio::test]
async fn test_pg_project_slot_frees_after_remove() {
    let pg = harness_or_skip!();
    let project = pg.add_project().await;
    let root = pg
        .service
        .create_root(CreateDirectoryRequest::new("Root"))
        .await
        .expect("root");

    let first = pg
        .service
        .create_for_project(CreateDirectoryRequest::new("First"), root.id, project)
        .await
        .expect("first");
    pg.service.remove(first.id).await.expect("remove");

    let second = pg
        .service
        .create_for_project(CreateDirectoryRequest::new("Second"), root.id, project)
        .await
        .expect("second");
    assert_eq!(second.project_id, Some(project));
}

#[tokio::test]
async fn test_pg_descendants_nearest_levels_first() {
    let pg = harness_or_skip!();
    let mut work = pg.store.begin().await.expect("begin");

    let root = work
        .insert_directory(&CreateDirectory::root("Root"))
        .await
        .expect("root");
    let a = work
        .insert_directory(&CreateDirectory::new("A", root.id, None, None))
        .await
        .expect("a");
    let a1 = work
        .insert_directory(&CreateDirectory::new("A1", a.id, None, None))
        .await
        .expect("a1");
    let b = work
        .insert_directory(&CreateDirectory::new("B", root.id, None, None))
        .await
        .expect("b");
    let b1 = work
        .insert_directory(&CreateDirectory::new("B1", b.id, None, None))
        .await
        .expect("b1");
    work.soft_delete_directories(&[b1.id]).await.expect("delete");

    let ids: Vec<_> = work
        .find_descendants(root.id)
        .await
        .expect("descendants")
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec![a.id, b.id, a1.id]);

    drop(work);
    let mut fresh = pg.store.begin().await.expect("begin");
    assert!(fresh.find_directory(root.id).await.expect("find").is_none());
}

#[tokio::test]
async fn test_pg_failed_assignment_leaves_no_grants() {
    let pg = harness_or_skip!();
    let user = pg.add_user().await;
    let root = pg
        .service
        .create_root(CreateDirectoryRequest::new("Shared"))
        .await
        .expect("root");

    let entries = [
        UserAuthority { user_id: user },
        UserAuthority {
            user_id: UserId::new(-1),
        },
    ];
    let err = pg.service.assign_authority(&entries, root.id).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(pg.grant_rows(root.id).await, 0);
}

#[tokio::test]
async fn test_pg_task_directory_and_rename() {
    let pg = harness_or_skip!();
    let project = pg.add_project().await;
    let task = pg.add_task(project).await;
    let root = pg
        .service
        .create_root(CreateDirectoryRequest::new("Root"))
        .await
        .expect("root");
    let project_dir = pg
        .service
        .create_for_project(CreateDirectoryRequest::new("Project"), root.id, project)
        .await
        .expect("project dir");

    let task_dir = pg
        .service
        .create_for_task(CreateDirectoryRequest::new("TaskDocs"), task, project)
        .await
        .expect("task dir");
    assert_eq!(task_dir.parent_id, Some(project_dir.id));
    assert_eq!(task_dir.task_id, Some(task));
    assert_eq!(task_dir.project_id, None);

    pg.service
        .rename(RenameDirectoryRequest::new("Docs"), task_dir.id)
        .await
        .expect("rename");
    let renamed = pg.service.get(task_dir.id).await.expect("get");
    assert_eq!(renamed.name, "Docs");
    assert_eq!(renamed.created_at, task_dir.created_at);
    assert!(renamed.updated_at >= task_dir.updated_at);
}
