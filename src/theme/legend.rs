//! Token types registered by the jjmagit language server.
//!
//! A rule whose `token_type` is missing here is valid JSON, but the editor will never
//! see a token of that type.

pub const TOKEN_TYPES: &[&str] = &[
    "jjmagit",
    "access-denied",
    "added",
    "author",
    "bad",
    "binary",
    "bookmark",
    "bookmarks",
    "change_id",
    "change_offset",
    "commit_id",
    "committer",
    "config_list",
    "conflict",
    "conflict_description",
    "conflicted",
    "context",
    "copied",
    "created",
    "current_operation",
    "deleted",
    "description",
    "diff",
    "difficult",
    "display",
    "divergent",
    "elided",
    "empty",
    "error",
    "error_source",
    "file_header",
    "git_head",
    "git_ref",
    "git_refs",
    "good",
    "header",
    "heading",
    "hidden",
    "hint",
    "hunk_header",
    "id",
    "immutable",
    "invalid",
    "key",
    "line_number",
    "local_bookmarks",
    "modified",
    "mutable",
    "name",
    "node",
    "operation",
    "overridden",
    "path",
    "placeholder",
    "prefix",
    "remote_bookmarks",
    "removed",
    "renamed",
    "rest",
    "root",
    "separator",
    "signature",
    "snapshot",
    "source",
    "status",
    "tag",
    "tags",
    "time",
    "timestamp",
    "token",
    "unknown",
    "untracked",
    "user",
    "value",
    "warning",
    "working_copies",
    "working_copy",
];

pub fn is_known(token_type: &str) -> bool {
    TOKEN_TYPES.contains(&token_type)
}
