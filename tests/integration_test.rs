use chrono::NaiveDate;
use git2::{Commit, Oid, Repository, Signature, Time};
use gitspiral::analysis::collect_history;
use gitspiral::plotting::{plan, render, DrawCommand};
use gitspiral::utils::aggregate_by_day;
use gitspiral::{ReleaseTier, RenderConfig, SpiralError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// 2021-03-01 10:00 and 12:00, 2021-06-15 10:00, 2022-01-10 10:00 (UTC)
const ROOT_TIME: i64 = 1_614_592_800;
const SAME_DAY_TIME: i64 = 1_614_600_000;
const SUMMER_TIME: i64 = 1_623_751_200;
const NEXT_YEAR_TIME: i64 = 1_641_808_800;

fn commit_file(repo: &Repository, dir: &Path, name: &str, content: &str, when: i64) -> Oid {
    fs::write(dir.join(name), content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let signature = Signature::new("Test User", "test@example.com", &Time::new(when, 0)).unwrap();
    let parents: Vec<Commit> = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&Commit> = parents.iter().collect();

    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        &format!("Update {}", name),
        &tree,
        &parent_refs,
    )
    .unwrap()
}

fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();
    let dir = temp_dir.path();

    commit_file(&repo, dir, "file1.txt", "a\nb\nc\n", ROOT_TIME);
    let second = commit_file(&repo, dir, "file2.txt", "x\ny\n", SAME_DAY_TIME);
    let summer = commit_file(&repo, dir, "file3.txt", "1\n2\n3\n4\n5\n", SUMMER_TIME);
    let last = commit_file(&repo, dir, "file1.txt", "a\n", NEXT_YEAR_TIME);

    let tagger = Signature::new("Test User", "test@example.com", &Time::new(SUMMER_TIME, 0)).unwrap();
    let second = repo.find_commit(second).unwrap();
    repo.tag("v0.1.0", second.as_object(), &tagger, "First preview", false)
        .unwrap();
    let summer = repo.find_commit(summer).unwrap();
    repo.tag_lightweight("v1.0.0", summer.as_object(), false).unwrap();
    let last = repo.find_commit(last).unwrap();
    repo.tag_lightweight("v1.0.1", last.as_object(), false).unwrap();
    repo.tag_lightweight("nightly", last.as_object(), false).unwrap();

    temp_dir
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_history_aggregates_per_day() {
    let temp_dir = setup_test_repo();
    let commits = collect_history(temp_dir.path().to_str().unwrap().to_string(), None)
        .await
        .unwrap();
    assert_eq!(commits.len(), 4);
    assert_eq!(commits.iter().filter(|c| c.is_root_commit).count(), 1);

    let days = aggregate_by_day(&commits);
    assert_eq!(days.len(), 3);

    let first = &days[0];
    assert_eq!(first.date, date(2021, 3, 1));
    assert_eq!((first.lines_added, first.lines_removed), (5, 0));
    assert!(first.is_root_commit_day);
    assert_eq!(first.release_tier, ReleaseTier::Minor);

    let summer = &days[1];
    assert_eq!(summer.date, date(2021, 6, 15));
    assert_eq!((summer.lines_added, summer.lines_removed), (5, 0));
    assert!(!summer.is_root_commit_day);
    assert_eq!(summer.release_tier, ReleaseTier::Major);

    let last = &days[2];
    assert_eq!(last.date, date(2022, 1, 10));
    assert_eq!((last.lines_added, last.lines_removed), (0, 2));
    assert_eq!(last.release_tier, ReleaseTier::Patch);
}

#[tokio::test]
async fn test_render_repository_to_png() {
    let temp_dir = setup_test_repo();
    let commits = collect_history(temp_dir.path().to_str().unwrap().to_string(), None)
        .await
        .unwrap();
    let days = aggregate_by_day(&commits);

    let config = RenderConfig {
        canvas_size: 400,
        margin: 20,
        ..RenderConfig::default()
    };

    // Three circles, plus markers for the minor and major releases only.
    let commands = plan(&days, &config).unwrap();
    let markers = commands
        .iter()
        .filter(|command| matches!(command, DrawCommand::FillPolygon { .. }))
        .count();
    assert_eq!(commands.len(), 3 * 2 + 2 * 2);
    assert_eq!(markers, 2);

    let output = temp_dir.path().join("history.png");
    render(&days, &config).unwrap().save(&output).unwrap();

    let image = image::open(&output).unwrap();
    assert_eq!((image.width(), image.height()), (440, 440));
}

#[tokio::test]
async fn test_unknown_branch_falls_back_to_head() {
    let temp_dir = setup_test_repo();
    let commits = collect_history(
        temp_dir.path().to_str().unwrap().to_string(),
        Some("nonexistent-branch".to_string()),
    )
    .await
    .unwrap();
    assert_eq!(commits.len(), 4);
}

#[tokio::test]
async fn test_error_handling() {
    let result = collect_history("/nonexistent/path".to_string(), None).await;
    assert!(matches!(result, Err(SpiralError::Git(_))));

    // A repository without commits has nothing to render.
    let temp_dir = TempDir::new().unwrap();
    Repository::init(temp_dir.path()).unwrap();
    let result = collect_history(temp_dir.path().to_str().unwrap().to_string(), None).await;
    assert!(result.is_err());

    assert!(matches!(
        render(&[], &RenderConfig::default()),
        Err(SpiralError::EmptyHistory)
    ));
}
