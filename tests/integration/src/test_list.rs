//! `ListObjects` conformance tests.

#[cfg(test)]
mod tests {
    use s3list_core::{KeyIndex, ListQuery, ListResult, ListingEngine};

    use crate::{
        EndpointConfig, cleanup_bucket, create_test_bucket, populate_bucket, remote_list,
        s3_client,
    };

    const DELIMITER_KEYS: &[&str] = &["bar", "baz", "cab", "foo"];
    const NESTED_KEYS: &[&str] = &["asdf", "boo/bar", "boo/baz/xyzzy", "cquux/thud", "cquux/bla"];
    const ALT_KEYS: &[&str] = &["bar", "bazar", "cab", "foo"];
    const DOT_KEYS: &[&str] = &["b.ar", "b.az", "c.ab", "foo"];
    const PERCENT_KEYS: &[&str] = &["b%ar", "b%az", "c%ab", "foo"];
    const SPACE_KEYS: &[&str] = &["b ar", "b az", "c ab", "foo"];

    fn query(prefix: &str, delimiter: &str, marker: &str, max_keys: usize) -> ListQuery {
        ListQuery {
            prefix: prefix.to_owned(),
            delimiter: delimiter.to_owned(),
            marker: marker.to_owned(),
            max_keys,
        }
    }

    /// Populate a fresh bucket with `keys`, then check every query's live
    /// response against the engine. `NextMarker` is not compared because
    /// servers may report the last common prefix instead of the last key.
    async fn assert_conforms(name: &str, keys: &[&str], queries: &[ListQuery]) {
        let client = s3_client(&EndpointConfig::from_env()).await;
        let bucket = create_test_bucket(&client, name).await.expect("create bucket");
        populate_bucket(&client, &bucket, keys).await.expect("populate bucket");

        let index: KeyIndex = keys.iter().copied().collect();
        for query in queries {
            let expected = ListingEngine::list(&index, query);
            let actual = remote_list(&client, &bucket, query).await.expect("list_objects");

            assert_eq!(actual.keys, expected.keys, "keys for {query:?}");
            assert_eq!(
                actual.common_prefixes, expected.common_prefixes,
                "common prefixes for {query:?}"
            );
            assert_eq!(actual.is_truncated, expected.is_truncated, "truncation for {query:?}");
        }

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_empty_bucket() {
        assert_conforms("empty", &[], &[ListQuery::default(), query("", "/", "", 1000)]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_group_by_delimiter() {
        assert_conforms("delim", DELIMITER_KEYS, &[query("", "a", "", 1000)]).await;
        assert_conforms("delim-alt", ALT_KEYS, &[query("", "a", "", 1000)]).await;
        assert_conforms("delim-nested", NESTED_KEYS, &[query("", "/", "", 1000)]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_treat_special_characters_as_literal_delimiters() {
        assert_conforms("delim-dot", DOT_KEYS, &[query("", ".", "", 1000)]).await;
        assert_conforms("delim-percent", PERCENT_KEYS, &[query("", "%", "", 1000)]).await;
        assert_conforms("delim-space", SPACE_KEYS, &[query("", " ", "", 1000)]).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_ignore_absent_or_unmatched_delimiter() {
        assert_conforms(
            "delim-none",
            NESTED_KEYS,
            &[
                query("", "", "", 1000),
                query("", "\n", "", 1000),
                query("", "/and-no-more", "", 1000),
            ],
        )
        .await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_filter_by_prefix() {
        assert_conforms(
            "prefix",
            &["foo/bar", "foo/baz", "quux"],
            &[
                query("foo/", "", "", 1000),
                query("", "", "", 1000),
                query("d", "", "", 1000),
                query("\n", "", "", 1000),
            ],
        )
        .await;
        assert_conforms(
            "prefix-alt",
            &["bar", "baz", "foo"],
            &[query("ba", "", "", 1000)],
        )
        .await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_combine_prefix_and_delimiter() {
        assert_conforms(
            "prefix-delim",
            &["foo/bar", "foo/baz/xyzzy", "quux/thud", "asdf"],
            &[
                query("foo/", "/", "", 1000),
                query("foo/", "d", "", 1000),
                query("b", "z", "", 1000),
                query("b", "/", "", 1000),
            ],
        )
        .await;
        assert_conforms(
            "prefix-delim-alt",
            &["bar", "bazar", "cab", "foo"],
            &[query("ba", "a", "", 1000)],
        )
        .await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_honor_max_keys() {
        assert_conforms(
            "maxkeys",
            &["bar", "baz", "foo", "quxx"],
            &[
                query("", "", "", 0),
                query("", "", "", 1),
                query("", "", "", 3),
                query("", "", "", 4),
            ],
        )
        .await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_start_after_marker() {
        assert_conforms(
            "marker",
            &["bar", "baz", "foo", "quxx"],
            &[
                query("", "", "", 1000),
                query("", "", "\n", 1000),
                query("", "", "blah", 1000),
                query("", "", "zzz", 1000),
                query("", "", "quxx", 1000),
                query("", "", "baz", 2),
            ],
        )
        .await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_page_through_whole_listing() {
        let keys = [
            "photos/2024/jan/img1.jpg",
            "photos/2024/jan/img2.jpg",
            "photos/2024/feb/img3.jpg",
            "photos/2025/mar/img4.jpg",
            "documents/report.pdf",
            "documents/readme.txt",
            "root.txt",
        ];
        let client = s3_client(&EndpointConfig::from_env()).await;
        let bucket = create_test_bucket(&client, "pages").await.expect("create bucket");
        populate_bucket(&client, &bucket, &keys).await.expect("populate bucket");

        let index: KeyIndex = keys.iter().copied().collect();
        for base in [query("", "/", "", 1), query("photos/", "/", "", 1), query("", "", "", 2)] {
            let expected = ListingEngine::list_all(&index, &base);

            // Resume from the reported marker, or the last key when the
            // server omits one.
            let mut collected = ListResult::default();
            let mut page_query = base.clone();
            loop {
                let page = remote_list(&client, &bucket, &page_query).await.expect("page");
                let resume = page
                    .next_marker
                    .clone()
                    .or_else(|| page.keys.last().cloned());
                collected.keys.extend(page.keys);
                for cp in page.common_prefixes {
                    if collected.common_prefixes.last() != Some(&cp) {
                        collected.common_prefixes.push(cp);
                    }
                }
                match resume {
                    Some(marker) if page.is_truncated => page_query = base.with_marker(marker),
                    _ => break,
                }
            }

            assert_eq!(collected.keys, expected.keys, "keys for {base:?}");
            assert_eq!(
                collected.common_prefixes, expected.common_prefixes,
                "common prefixes for {base:?}"
            );
        }

        cleanup_bucket(&client, &bucket).await;
    }
}
