use depviz_core::RepositoryIndex;

/// Alpine-style package records served in `remote` mode.
const ALPINE_MOCK_RECORDS: &[(&str, &[&str])] = &[
    ("busybox", &["musl", "alpine-baselayout", "libcrypto1.1"]),
    ("python3", &["busybox", "libssl1.1", "zlib>=1.2.11", "libffi"]),
    ("openssl", &["libcrypto1.1", "musl"]),
    ("libssl1.1", &["libcrypto1.1", "musl"]),
    ("musl", &[]),
    ("libcrypto1.1", &["musl"]),
    ("zlib", &["musl"]),
    ("libffi", &["musl"]),
    ("alpine-baselayout", &[]),
];

pub fn alpine_mock_index() -> RepositoryIndex {
    ALPINE_MOCK_RECORDS
        .iter()
        .map(|(package, deps)| (*package, deps.iter().copied()))
        .collect()
}
