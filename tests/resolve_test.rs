mod common;

use assert2::{check, let_assert};
use bun_docs_mcp::tools::{ReadDocRequest, handle_read_doc};
use bun_docs_mcp::{IndexSettings, ReadResult, Resolver};
use common::{IndexedCorpus, TempWorkspace, WEBSOCKETS_MD, index, write_sample_corpus};
use rstest::rstest;

fn resolver(corpus: &IndexedCorpus) -> Resolver {
    Resolver::new(corpus.index.clone())
}

fn entry_uris(result: &ReadResult) -> Vec<String> {
    let_assert!(ReadResult::Directory { entries, .. } = result);
    entries.iter().map(|entry| entry.uri.clone()).collect()
}

#[rstest]
#[case("")]
#[case("/")]
#[case("bun://")]
#[case("  //  ")]
fn root_listing_shows_top_level_entries_in_order(index: IndexedCorpus, #[case] path: &str) {
    let result = resolver(&index).resolve(path);

    check!(result.uri() == "bun://");
    check!(
        entry_uris(&result)
            == [
                "bun://index",
                "bun://installation",
                "bun://api/websockets",
                "bun://api/http",
                "bun://ecosystem/react",
                "bun://guides",
                "bun://ecosystem/express",
            ]
    );
}

#[rstest]
fn root_listing_hides_nested_guides(index: IndexedCorpus) {
    let uris = entry_uris(&resolver(&index).resolve(""));
    check!(uris.iter().all(|uri| !uri.starts_with("bun://guides/")));
}

#[rstest]
fn listing_is_idempotent(index: IndexedCorpus) {
    let resolver = resolver(&index);
    check!(resolver.resolve("") == resolver.resolve(""));
    check!(resolver.resolve("guides") == resolver.resolve("/guides/"));
}

#[rstest]
#[case("api/websockets")]
#[case("/api/websockets/")]
#[case("api//websockets")]
#[case("bun://api/websockets")]
#[case("/bun://api/websockets")]
#[case("api/websockets.md")]
fn document_reads_return_raw_markdown(index: IndexedCorpus, #[case] path: &str) {
    let result = resolver(&index).resolve(path);

    let_assert!(
        ReadResult::Document {
            uri,
            mime_type,
            text
        } = result
    );
    check!(uri == "bun://api/websockets");
    check!(mime_type == "text/markdown");
    check!(text == WEBSOCKETS_MD);
}

#[rstest]
fn guides_directory_lists_direct_children_sorted(index: IndexedCorpus) {
    let result = resolver(&index).resolve("guides");

    check!(result.uri() == "bun://guides");
    check!(entry_uris(&result) == ["bun://guides/http", "bun://guides/websockets"]);

    let_assert!(ReadResult::Directory { entries, .. } = result);
    check!(entries[1].name == "Realtime");
    check!(entries[1].mime_type == "application/json");
}

#[rstest]
fn nested_directory_lists_documents_and_subdirectories(index: IndexedCorpus) {
    let result = resolver(&index).resolve("guides/http");
    check!(entry_uris(&result) == ["bun://guides/http/simple", "bun://guides/http/tls"]);
}

#[rstest]
fn guide_documents_are_readable(index: IndexedCorpus) {
    let result = resolver(&index).resolve("guides/websockets/pubsub");
    let_assert!(ReadResult::Document { text, .. } = result);
    check!(text == common::PUBSUB_MD);
}

#[rstest]
#[case("does/not/exist", "does/not/exist")]
#[case("/api/ffi/", "api/ffi")]
#[case("old-api", "old-api")]
#[case("api/missing", "api/missing")]
#[case("guides/.hidden/secret", "guides/.hidden/secret")]
fn unknown_paths_are_not_found(
    index: IndexedCorpus,
    #[case] path: &str,
    #[case] normalized: &str,
) {
    let result = resolver(&index).resolve(path);

    let_assert!(ReadResult::NotFound { path: reported } = &result);
    check!(reported == normalized);
    check!(!result.is_success());

    let (mime, text) = result.render();
    check!(mime == "text/plain");
    check!(text.starts_with(&format!("Not found: bun://{}", normalized)));
    check!(text.contains("List bun://"));
}

#[rstest]
fn list_only_answers_for_directories(index: IndexedCorpus) {
    let resolver = resolver(&index);

    let_assert!(Some(root) = resolver.list(""));
    check!(root.len() == 7);
    check!(resolver.list("guides").is_some_and(|entries| entries.len() == 2));
    check!(resolver.list("api/websockets").is_none());
    check!(resolver.list("nope").is_none());
}

#[rstest]
fn directory_listing_renders_as_json(index: IndexedCorpus) {
    let (mime, text) = resolver(&index).resolve("guides").render();
    check!(mime == "application/json");

    let_assert!(Ok(entries) = serde_json::from_str::<Vec<serde_json::Value>>(&text));
    check!(entries.len() == 2);
    check!(entries[0]["uri"] == "bun://guides/http");
    check!(entries[0]["mimeType"] == "application/json");
    check!(entries[0]["description"] == "Guides: http");
}

#[test]
fn oversized_documents_are_refused() {
    let workspace = TempWorkspace::new();
    write_sample_corpus(&workspace);
    let settings = IndexSettings {
        max_document_bytes: 8,
        ..IndexSettings::default()
    };
    let corpus = IndexedCorpus::build(workspace, &settings);

    let result = resolver(&corpus).resolve("api/websockets");
    let_assert!(ReadResult::TooLarge { uri, size, limit } = result);
    check!(uri == "bun://api/websockets");
    check!(size == WEBSOCKETS_MD.len() as u64);
    check!(limit == 8);
}

#[test]
fn documents_deleted_after_indexing_are_unreadable() {
    let workspace = TempWorkspace::new();
    write_sample_corpus(&workspace);
    let corpus = IndexedCorpus::build(workspace, &IndexSettings::default());
    std::fs::remove_file(corpus.workspace.path().join("installation.md")).unwrap();

    let result = resolver(&corpus).resolve("installation");
    let_assert!(ReadResult::Unreadable { uri, .. } = result);
    check!(uri == "bun://installation");
}

#[rstest]
fn read_doc_tool_resolves_paths(index: IndexedCorpus) {
    let resolver = resolver(&index);
    let request = ReadDocRequest {
        path: "bun://guides/http/tls/setup".to_string(),
    };

    let_assert!(ReadResult::Document { text, .. } = handle_read_doc(&resolver, &request));
    check!(text.contains("TLS needs a key and a cert."));
}
