// tests/git_repository_test.rs
mod common;

use common::TestRepo;
use gh_semver::git::{Git2Repository, Repository, WalkOrder};

fn open(test_repo: &TestRepo) -> Git2Repository {
    Git2Repository::open(test_repo.path()).expect("Should open repository")
}

#[test]
fn test_tags_peel_annotated_and_lightweight() {
    let t = TestRepo::new();
    let first = t.commit("README.md", "one\n", "chore: init");
    let second = t.commit("README.md", "two\n", "feat: more");
    t.tag_lightweight("v1.0.0", first);
    t.tag_annotated("v1.1.0", second);

    let repo = open(&t);
    let mut tags = repo.tags(None).unwrap();
    tags.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "v1.0.0");
    assert_eq!(tags[0].target, first.to_string());
    assert_eq!(tags[1].name, "v1.1.0");
    assert_eq!(tags[1].target, second.to_string());
}

#[test]
fn test_tags_filtered_by_prefix() {
    let t = TestRepo::new();
    let commit = t.commit("README.md", "one\n", "chore: init");
    t.tag_lightweight("api-v1.0.0", commit);
    t.tag_lightweight("web-v1.0.0", commit);

    let tags = open(&t).tags(Some("web")).unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "web-v1.0.0");
}

#[test]
fn test_walk_orders_across_merge() {
    let t = TestRepo::new();
    let root = t.commit("README.md", "root\n", "chore: init");
    t.create_branch("feature");
    let feature = t.commit("feature.txt", "f\n", "feat: feature work");
    t.checkout("main");
    let main = t.commit("main.txt", "m\n", "fix: main work");
    let merge = t.merge(feature, "Merge branch 'feature'");

    let repo = open(&t);
    let walk = |order| -> Vec<String> {
        repo.walk(&merge.to_string(), order)
            .unwrap()
            .map(|c| c.unwrap().hash)
            .collect()
    };

    assert_eq!(
        walk(WalkOrder::MainLine),
        [merge, main, root, feature].map(|oid| oid.to_string())
    );
    assert_eq!(
        walk(WalkOrder::CurrentPosition),
        [merge, feature, root, main].map(|oid| oid.to_string())
    );
}

#[test]
fn test_walk_reads_messages_and_parents() {
    let t = TestRepo::new();
    let root = t.commit("README.md", "root\n", "chore: init");
    let child = t.commit("README.md", "next\n", "feat(core): next\n\nbody");

    let repo = open(&t);
    let commits: Vec<_> = repo
        .walk("HEAD", WalkOrder::MainLine)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].hash, child.to_string());
    assert_eq!(commits[0].message, "feat(core): next\n\nbody");
    assert_eq!(commits[0].parents, vec![root.to_string()]);
    assert!(commits[1].parents.is_empty());
}

#[test]
fn test_changed_files() {
    let t = TestRepo::new();
    let root = t.commit("api/main.rs", "fn main() {}\n", "chore: init");
    let second = t.commit("web/index.js", "export {}\n", "feat: web");

    let repo = open(&t);
    assert_eq!(repo.changed_files(&root.to_string()).unwrap(), ["api/main.rs"]);
    assert_eq!(repo.changed_files(&second.to_string()).unwrap(), ["web/index.js"]);
}

#[test]
fn test_changed_files_lists_modified_path_once() {
    let t = TestRepo::new();
    t.commit("api/main.rs", "fn main() {}\n", "chore: init");
    let edit = t.commit("api/main.rs", "fn main() { run() }\n", "fix: run");

    let repo = open(&t);
    assert_eq!(repo.changed_files(&edit.to_string()).unwrap(), ["api/main.rs"]);
}

#[test]
fn test_head_branch_and_detached() {
    let t = TestRepo::new();
    let first = t.commit("README.md", "one\n", "chore: init");
    t.create_branch("feature/x");
    let second = t.commit("README.md", "two\n", "feat: x");

    let repo = open(&t);
    let head = repo.head().unwrap();
    assert_eq!(head.branch.as_deref(), Some("feature/x"));
    assert_eq!(head.hash, second.to_string());

    t.detach(first);
    let head = repo.head().unwrap();
    assert!(head.is_detached());
    assert_eq!(head.hash, first.to_string());
}

#[test]
fn test_remote_default_branch() {
    let t = TestRepo::new();
    let commit = t.commit("README.md", "one\n", "chore: init");

    let repo = open(&t);
    assert_eq!(repo.remote_default_branch("origin").unwrap(), None);

    t.repo
        .reference("refs/remotes/origin/trunk", commit, true, "test")
        .unwrap();
    t.repo
        .reference_symbolic("refs/remotes/origin/HEAD", "refs/remotes/origin/trunk", true, "test")
        .unwrap();

    assert_eq!(
        repo.remote_default_branch("origin").unwrap().as_deref(),
        Some("trunk")
    );
    assert_eq!(repo.remote_default_branch("upstream").unwrap(), None);
}

#[test]
fn test_create_annotated_tag_once() {
    let t = TestRepo::new();
    let commit = t.commit("README.md", "one\n", "chore: init");

    let repo = open(&t);
    assert!(repo
        .create_annotated_tag("v0.1.0", &commit.to_string(), "v0.1.0")
        .unwrap());
    assert!(!repo
        .create_annotated_tag("v0.1.0", &commit.to_string(), "v0.1.0")
        .unwrap());

    let reference = t.repo.find_reference("refs/tags/v0.1.0").unwrap();
    let tag = reference.peel_to_tag().expect("Tag should be annotated");
    assert_eq!(tag.message().map(str::trim_end), Some("v0.1.0"));
    assert_eq!(tag.target_id(), commit);
}
