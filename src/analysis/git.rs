use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use git2::{Oid, Repository};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::spawn_blocking;
use tracing::{debug, info};

use super::release::release_tiers;
use crate::error::{Result, SpiralError};
use crate::types::{CommitSummary, ReleaseTier};

fn join_err(e: tokio::task::JoinError) -> SpiralError {
    SpiralError::Task(e.to_string())
}

/// Commits to summarize and what is known about them up front
struct WalkPlan {
    repo_path: PathBuf,
    commits: Vec<Oid>,
    root: Oid,
    releases: HashMap<Oid, ReleaseTier>,
}

/// Summarize every commit reachable from `branch` (or HEAD when it is absent or unknown).
pub async fn collect_history(path: String, branch: Option<String>) -> Result<Vec<CommitSummary>> {
    info!("Start processing commits.");
    let start_time = Instant::now();

    let plan = spawn_blocking(move || plan_walk(&path, branch.as_deref()))
        .await
        .map_err(join_err)??;
    debug!(commits = plan.commits.len(), releases = plan.releases.len(), "history walked");

    let summaries = process_commits_parallel(plan).await?;

    info!(
        "Finished processing of {} commits after {:.2} seconds.",
        summaries.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(summaries)
}

fn plan_walk(path: &str, branch: Option<&str>) -> Result<WalkPlan> {
    let repo = Repository::open(path)?;
    let tip = resolve_tip(&repo, branch)?;

    let mut revwalk = repo.revwalk()?;
    revwalk.push(tip)?;
    let commits = revwalk.collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(WalkPlan {
        repo_path: repo.path().to_path_buf(),
        commits,
        root: find_root_commit(&repo, tip)?,
        releases: release_tiers(&repo)?,
    })
}

fn resolve_tip(repo: &Repository, branch: Option<&str>) -> Result<Oid> {
    if let Some(name) = branch {
        match repo.find_branch(name, git2::BranchType::Local) {
            Ok(branch_ref) => return Ok(branch_ref.get().peel_to_commit()?.id()),
            Err(e) => debug!(branch = name, "branch not found, using HEAD: {}", e),
        }
    }
    Ok(repo.head()?.peel_to_commit()?.id())
}

/// The commit reached by following first parents from `tip`.
fn find_root_commit(repo: &Repository, tip: Oid) -> Result<Oid> {
    let mut commit = repo.find_commit(tip)?;
    while commit.parent_count() > 0 {
        commit = commit.parent(0)?;
    }
    Ok(commit.id())
}

/// Calendar date of a git timestamp in its own UTC offset.
fn author_date(time: git2::Time) -> Result<NaiveDate> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
    DateTime::<Utc>::from_timestamp(time.seconds(), 0)
        .map(|dt| dt.with_timezone(&offset).date_naive())
        .ok_or_else(|| SpiralError::Git(git2::Error::from_str("commit timestamp out of range")))
}

/// Process a chunk of commits
fn process_commit_chunk(
    repo: &Repository,
    chunk: &[Oid],
    root: Oid,
    releases: &HashMap<Oid, ReleaseTier>,
) -> Result<Vec<CommitSummary>> {
    let mut summaries = Vec::with_capacity(chunk.len());

    let mut diff_opts = git2::DiffOptions::new();
    diff_opts.include_untracked(false).context_lines(0);

    for &oid in chunk {
        let commit = repo.find_commit(oid)?;
        let tree = commit.tree()?;
        let parent_tree = match commit.parent_count() {
            0 => None,
            _ => Some(commit.parent(0)?.tree()?),
        };

        let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut diff_opts))?;
        let stats = diff.stats()?;

        summaries.push(CommitSummary {
            date: author_date(commit.author().when())?,
            lines_added: stats.insertions() as u64,
            lines_removed: stats.deletions() as u64,
            is_root_commit: oid == root,
            release_tier: releases.get(&oid).copied().unwrap_or_default(),
        });
    }

    Ok(summaries)
}

/// Get optimal chunk size based on commit count
fn get_optimal_chunk_size(total_commits: usize) -> usize {
    const MIN_CHUNK_SIZE: usize = 100;
    const MAX_CHUNK_SIZE: usize = 2000;

    (total_commits / get_optimal_task_count().max(1)).clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

/// Leave one core for the rest of the system
fn get_optimal_task_count() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

/// Process commits in parallel chunks
async fn process_commits_parallel(plan: WalkPlan) -> Result<Vec<CommitSummary>> {
    let chunk_size = get_optimal_chunk_size(plan.commits.len());
    let max_tasks = get_optimal_task_count();
    let semaphore = Arc::new(Semaphore::new(max_tasks));
    let releases = Arc::new(plan.releases);
    let root = plan.root;

    debug!(chunk_size, max_tasks, "processing commit chunks");

    let mut handles = Vec::new();
    for chunk in plan.commits.chunks(chunk_size) {
        let chunk = chunk.to_vec();
        let repo_path = plan.repo_path.clone();
        let releases = Arc::clone(&releases);
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| SpiralError::Task(format!("Failed to acquire semaphore: {}", e)))?;

        handles.push(tokio::spawn(async move {
            let _permit = permit;
            spawn_blocking(move || {
                let repo = Repository::open(repo_path)?;
                process_commit_chunk(&repo, &chunk, root, &releases)
            })
            .await
            .map_err(join_err)?
        }));
    }

    let mut summaries = Vec::with_capacity(plan.commits.len());
    for result in futures::future::join_all(handles).await {
        summaries.extend(result.map_err(join_err)??);
    }
    Ok(summaries)
}
