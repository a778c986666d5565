use super::*;
use crate::config::{PlanStrategySetting, PreviewField};
use crate::engine::PlanStrategy;
use crate::playlist::{Playlist, Track};
use crate::remote::{Library, MemoryRemote, RemoteError};
use tempfile::tempdir;

fn item(id: &str, by: &str) -> PlaylistItem {
    PlaylistItem {
        track: Track {
            id: id.into(),
            title: format!("Song {id}"),
            artist: Some(format!("Artist {id}")),
            album: None,
        },
        added_by: by.into(),
    }
}

/// `[a,b,c,d,e]` added by `[g1,g1,g2,g2,g1]`.
fn party() -> Playlist {
    Playlist {
        id: "p1".into(),
        name: "party".into(),
        owner: "me".into(),
        revision: Revision("r0".into()),
        items: vec![
            item("a", "g1"),
            item("b", "g1"),
            item("c", "g2"),
            item("d", "g2"),
            item("e", "g1"),
        ],
    }
}

fn ctx(dry_run: bool) -> RunContext {
    RunContext {
        user: "me".into(),
        playlist_name: "party".into(),
        dry_run,
        strategy: PlanStrategy::Settle,
        verify: true,
        page_size: 2,
    }
}

fn ids(remote: &MemoryRemote) -> Vec<String> {
    remote.playlists[0]
        .items
        .iter()
        .map(|i| i.track.id.clone())
        .collect()
}

#[test]
fn dry_run_prints_preview_and_leaves_playlist_alone() {
    let mut remote = MemoryRemote::new("me", vec![party()]);
    let mut out: Vec<u8> = Vec::new();

    let outcome = reorder(
        &ctx(true),
        &mut remote,
        None,
        &PreviewSettings::default(),
        &mut out,
    )
    .unwrap();

    assert_eq!(outcome, Outcome::Previewed { moves: 1 });
    assert_eq!(remote.relocate_calls, 0);
    assert_eq!(ids(&remote), vec!["a", "b", "c", "d", "e"]);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "0 | g1 | Artist a - Song a",
            "1 | g2 | Artist c - Song c",
            "2 | g1 | Artist b - Song b",
            "3 | g2 | Artist d - Song d",
            "4 | g1 | Artist e - Song e",
        ]
    );
}

#[test]
fn live_run_interleaves_and_chains_revisions() {
    let mut remote = MemoryRemote::new("me", vec![party()]);
    let mut out: Vec<u8> = Vec::new();

    let outcome = reorder(
        &ctx(false),
        &mut remote,
        None,
        &PreviewSettings::default(),
        &mut out,
    )
    .unwrap();

    assert_eq!(
        outcome,
        Outcome::Applied {
            moves: 1,
            revision: Revision("mem-1".into()),
        }
    );
    assert_eq!(ids(&remote), vec!["a", "c", "b", "d", "e"]);
    assert!(out.is_empty());
}

#[test]
fn append_strategy_reaches_same_order() {
    let mut remote = MemoryRemote::new("me", vec![party()]);
    let mut run = ctx(false);
    run.strategy = PlanStrategy::AppendToBack;

    let outcome = reorder(
        &run,
        &mut remote,
        None,
        &PreviewSettings::default(),
        &mut std::io::sink(),
    )
    .unwrap();

    assert!(matches!(outcome, Outcome::Applied { moves: 5, .. }));
    assert_eq!(remote.relocate_calls, 5);
    assert_eq!(ids(&remote), vec!["a", "c", "b", "d", "e"]);
}

#[test]
fn already_interleaved_playlist_is_left_unchanged() {
    let mut pl = party();
    pl.items = vec![item("a", "g1"), item("c", "g2"), item("b", "g1")];
    let mut remote = MemoryRemote::new("me", vec![pl]);

    let outcome = reorder(
        &ctx(false),
        &mut remote,
        None,
        &PreviewSettings::default(),
        &mut std::io::sink(),
    )
    .unwrap();

    assert_eq!(outcome, Outcome::Unchanged);
    assert_eq!(remote.relocate_calls, 0);
}

#[test]
fn failed_move_drops_cached_playlist() {
    let dir = tempdir().unwrap();
    let cache = PlaylistCache::new(dir.path());

    let mut pl = party();
    // g1 g1 g1 g2 g2 needs two moves.
    pl.items = vec![
        item("a", "g1"),
        item("b", "g1"),
        item("e", "g1"),
        item("c", "g2"),
        item("d", "g2"),
    ];
    let mut remote = MemoryRemote::new("me", vec![pl]);
    remote.fail_at = Some(1);

    let err = reorder(
        &ctx(false),
        &mut remote,
        Some(&cache),
        &PreviewSettings::default(),
        &mut std::io::sink(),
    )
    .unwrap_err();

    match err {
        AppError::Execute(e) => {
            assert_eq!(e.step, 2);
            assert_eq!(e.total, 2);
            assert!(matches!(e.source, RemoteError::Rejected(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(cache.load("p1").unwrap().is_none());
    // The first move is committed; the playlist is in between.
    assert_eq!(ids(&remote), vec!["a", "c", "b", "e", "d"]);
}

#[test]
fn failed_move_without_cache_reports_partial_reorder() {
    let mut remote = MemoryRemote::new("me", vec![party()]);
    remote.fail_at = Some(0);

    let err = reorder(
        &ctx(false),
        &mut remote,
        None,
        &PreviewSettings::default(),
        &mut std::io::sink(),
    )
    .unwrap_err();

    let msg = err.to_string();
    assert!(msg.starts_with("failed to reorder at step 1/1"), "{msg}");
    assert!(msg.contains("refetch before trying again"), "{msg}");
    assert!(!msg.contains("cache"), "{msg}");
}

#[test]
fn fresh_cache_is_used_instead_of_fetching() {
    let dir = tempdir().unwrap();
    let cache = PlaylistCache::new(dir.path());

    // Snapshot claims a different order at the current revision.
    let mut cached = party();
    cached.items.swap(0, 1);
    cache.save(&cached).unwrap();

    let remote = MemoryRemote::new("me", vec![party()]);
    let pl = load_playlist(&remote, Some(&cache), &ctx(true)).unwrap();
    assert_eq!(pl.track_ids(), vec!["b", "a", "c", "d", "e"]);
}

#[test]
fn stale_cache_is_refetched_and_rewritten() {
    let dir = tempdir().unwrap();
    let cache = PlaylistCache::new(dir.path());

    let mut cached = party();
    cached.revision = Revision("old".into());
    cached.items.truncate(2);
    cache.save(&cached).unwrap();

    let remote = MemoryRemote::new("me", vec![party()]);
    let pl = load_playlist(&remote, Some(&cache), &ctx(true)).unwrap();
    assert_eq!(pl.items.len(), 5);
    assert_eq!(pl.revision, Revision("r0".into()));

    let rewritten = cache.load("p1").unwrap().unwrap();
    assert_eq!(rewritten, pl);
}

#[test]
fn successful_run_refreshes_cache_with_new_order() {
    let dir = tempdir().unwrap();
    let cache = PlaylistCache::new(dir.path());
    let mut remote = MemoryRemote::new("me", vec![party()]);

    reorder(
        &ctx(false),
        &mut remote,
        Some(&cache),
        &PreviewSettings::default(),
        &mut std::io::sink(),
    )
    .unwrap();

    let cached = cache.load("p1").unwrap().unwrap();
    assert_eq!(cached.revision, remote.playlists[0].revision);
    assert_eq!(cached.items, remote.playlists[0].items);
}

#[test]
fn missing_playlist_is_reported() {
    let mut remote = MemoryRemote::new("me", vec![party()]);
    let mut run = ctx(true);
    run.playlist_name = "workout".into();

    let err = reorder(
        &run,
        &mut remote,
        None,
        &PreviewSettings::default(),
        &mut std::io::sink(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::Remote(RemoteError::PlaylistNotFound { .. })
    ));
}

#[test]
fn run_context_requires_playlist_name() {
    let remote = MemoryRemote::new("me", vec![party()]);
    let settings = Settings::default();
    assert!(matches!(
        RunContext::new(&remote, &settings, false),
        Err(AppError::MissingPlaylistName)
    ));

    let mut settings = Settings::default();
    settings.playlist.name = Some("party".into());
    settings.plan.strategy = PlanStrategySetting::AppendToBack;
    let ctx = RunContext::new(&remote, &settings, true).unwrap();
    assert_eq!(ctx.user, "me");
    assert_eq!(ctx.strategy, PlanStrategy::AppendToBack);
    assert!(ctx.dry_run);
}

#[test]
fn cli_overrides_settings() {
    let cli = Cli::parse_from([
        "interlace",
        "--playlist",
        "friday",
        "--dry-run",
        "--source",
        "/tmp/lib.json",
        "--no-cache",
        "--strategy",
        "append-to-back",
    ]);
    assert!(cli.dry);

    let mut settings = Settings::default();
    cli.apply_to(&mut settings);
    assert_eq!(settings.playlist.name.as_deref(), Some("friday"));
    assert_eq!(settings.source.path, Some("/tmp/lib.json".into()));
    assert!(!settings.cache.enabled);
    assert_eq!(settings.plan.strategy, PlanStrategySetting::AppendToBack);
}

#[test]
fn preview_respects_configured_columns() {
    let items: Vec<PlaylistItem> = (0..11).map(|i| item(&i.to_string(), "ana")).collect();
    let settings = PreviewSettings {
        fields: vec![PreviewField::Track, PreviewField::Position],
        separator: "\t".into(),
        ..PreviewSettings::default()
    };
    let lines = render_preview(&items, &settings);
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "Artist 0 - Song 0\t 0");
    assert_eq!(lines[10], "Artist 10 - Song 10\t10");
}

#[test]
fn execute_stops_at_first_failure() {
    let mut remote = MemoryRemote::new("me", vec![party()]);
    let plan = vec![
        engine::Relocate::new(2, 1),
        engine::Relocate::new(9, 0),
        engine::Relocate::new(1, 0),
    ];
    let err = execute(&mut remote, "p1", Revision("r0".into()), &plan).unwrap_err();
    assert_eq!(err.step, 2);
    assert_eq!(err.total, 3);
    assert!(matches!(
        err.source,
        RemoteError::OutOfRange { from: 9, .. }
    ));
    assert_eq!(remote.relocate_calls, 2);
}

#[test]
fn file_remote_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.json");
    let mut remote = FileRemote::create(
        &path,
        Library {
            user: "me".into(),
            playlists: vec![party()],
            commits: 0,
        },
    )
    .unwrap();

    reorder(
        &ctx(false),
        &mut remote,
        None,
        &PreviewSettings::default(),
        &mut std::io::sink(),
    )
    .unwrap();

    let reopened = FileRemote::open(&path).unwrap();
    let order: Vec<&str> = reopened.library().playlists[0].track_ids();
    assert_eq!(order, vec!["a", "c", "b", "d", "e"]);
}
