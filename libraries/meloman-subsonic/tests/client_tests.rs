//! Tests for the Subsonic client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real server connection.

use meloman_playback::{MediaGateway, PlaybackError};
use meloman_subsonic::{ServerConfig, SubsonicClient, SubsonicError};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

fn ok(payload: Value) -> ResponseTemplate {
    let mut body = json!({ "status": "ok", "version": "1.16.1" });
    if let (Some(body), Some(payload)) = (body.as_object_mut(), payload.as_object()) {
        body.extend(payload.clone());
    }
    ResponseTemplate::new(200).set_body_json(json!({ "subsonic-response": body }))
}

fn failed(code: i32, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "subsonic-response": {
            "status": "failed",
            "version": "1.16.1",
            "error": { "code": code, "message": message }
        }
    }))
}

fn client_for(server: &MockServer) -> SubsonicClient {
    let config = ServerConfig::new(server.uri(), "alice", "26719a1196d2a940705a59634eb18eab", "c19b2d");
    SubsonicClient::new(config).unwrap()
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(SubsonicClient::new(ServerConfig::new("https://example.com", "a", "t", "s")).is_ok());
        assert!(SubsonicClient::new(ServerConfig::new("http://localhost:4533", "a", "t", "s")).is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = SubsonicClient::new(ServerConfig::new("", "a", "t", "s"));

        match result {
            Err(SubsonicError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let result = SubsonicClient::new(ServerConfig::new("example.com", "a", "t", "s"));

        match result {
            Err(SubsonicError::InvalidUrl(msg)) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[test]
    fn test_url_normalization_trailing_slash() {
        let client =
            SubsonicClient::new(ServerConfig::new("https://example.com/", "a", "t", "s")).unwrap();
        assert_eq!(client.url(), "https://example.com");
    }
}

// =============================================================================
// Connection Tests
// =============================================================================

mod connection {
    use super::*;

    #[tokio::test]
    async fn test_ping_sends_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/ping"))
            .and(query_param("u", "alice"))
            .and(query_param("t", "26719a1196d2a940705a59634eb18eab"))
            .and(query_param("s", "c19b2d"))
            .and(query_param("v", "1.8.0"))
            .and(query_param("c", "MelomanWeb"))
            .and(query_param("f", "json"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_ping_wrong_password() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/ping"))
            .respond_with(failed(40, "Wrong username or password"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.ping().await.unwrap_err();

        assert!(err.is_auth_failure());
        match err {
            SubsonicError::Api { code, message } => {
                assert_eq!(code, 40);
                assert!(message.contains("Wrong"));
            }
            e => panic!("Expected Api error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_ping_without_credentials_skips_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ok(json!({})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = SubsonicClient::new(ServerConfig::new(mock_server.uri(), "alice", "", "")).unwrap();
        assert!(matches!(client.ping().await, Err(SubsonicError::AuthRequired)));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/ping"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        match client.ping().await.unwrap_err() {
            SubsonicError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("Internal Server Error"));
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_http_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/ping"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(matches!(client.ping().await, Err(SubsonicError::AuthRequired)));
    }

    #[tokio::test]
    async fn test_invalid_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(matches!(client.ping().await, Err(SubsonicError::ParseError(_))));
    }
}

// =============================================================================
// Library Tests
// =============================================================================

mod library {
    use super::*;

    #[tokio::test]
    async fn test_album_list_is_alphabetical_and_deduplicated() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getAlbumList2"))
            .and(query_param("type", "alphabeticalByName"))
            .and(query_param("size", "500"))
            .respond_with(ok(json!({
                "albumList2": { "album": [
                    { "id": "al-1", "name": "Amnesiac", "artist": "Radiohead" },
                    { "id": "al-2", "name": "Kid A", "artist": "Radiohead" },
                    { "id": "al-3", "name": "kid a ", "artist": "RADIOHEAD" }
                ]}
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let albums = client.album_list().await.unwrap();

        let ids: Vec<&str> = albums.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["al-1", "al-2"]);
    }

    #[tokio::test]
    async fn test_album_list_missing_payload_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getAlbumList2"))
            .respond_with(ok(json!({})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(client.album_list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_artists_flattened_from_index() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getArtists"))
            .respond_with(ok(json!({
                "artists": { "index": [
                    { "name": "A", "artist": [{ "id": "ar-1", "name": "ABBA", "albumCount": 9 }] },
                    { "name": "B", "artist": [
                        { "id": "ar-2", "name": "Beck" },
                        { "id": "ar-3", "name": "Björk" }
                    ]}
                ]}
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let artists = client.artists().await.unwrap();

        let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["ABBA", "Beck", "Björk"]);
        assert_eq!(artists[0].album_count, Some(9));
    }

    #[tokio::test]
    async fn test_album_with_songs() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getAlbum"))
            .and(query_param("id", "al-7"))
            .respond_with(ok(json!({
                "album": {
                    "id": "al-7",
                    "name": "OK Computer",
                    "artist": "Radiohead",
                    "coverArt": "al-7",
                    "song": [
                        { "id": "s1", "title": "Airbag", "artist": "Radiohead", "duration": 284, "coverArt": "al-7" },
                        { "id": "s2", "title": "Paranoid Android", "artist": "Radiohead", "duration": 383 }
                    ]
                }
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let album = client.album("al-7").await.unwrap();
        let tracks = album.tracks();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[1].title, "Paranoid Android");
        assert_eq!(tracks[1].duration, Duration::from_secs(383));
    }

    #[tokio::test]
    async fn test_album_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getAlbum"))
            .respond_with(failed(70, "Album not found"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(matches!(
            client.album("missing").await,
            Err(SubsonicError::Api { code: 70, .. })
        ));
    }

    #[tokio::test]
    async fn test_search_counts() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/search3"))
            .and(query_param("query", "blue"))
            .and(query_param("albumCount", "20"))
            .and(query_param("artistCount", "20"))
            .and(query_param("songCount", "50"))
            .respond_with(ok(json!({
                "searchResult3": {
                    "album": [{ "id": "al-1", "name": "Blue", "artist": "Joni Mitchell" }],
                    "song": [{ "id": "s1", "title": "Blue" }]
                }
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client.search("blue").await.unwrap();

        assert!(result.artists.is_empty());
        assert_eq!(result.albums.len(), 1);
        assert_eq!(result.songs[0].title, "Blue");
    }

    #[tokio::test]
    async fn test_random_songs_and_playlists() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getRandomSongs"))
            .and(query_param("size", "2"))
            .respond_with(ok(json!({
                "randomSongs": { "song": [{ "id": "s1", "title": "One" }, { "id": "s2", "title": "Two" }] }
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/getPlaylists"))
            .respond_with(ok(json!({
                "playlists": { "playlist": [{ "id": "p1", "name": "Morning", "songCount": 12 }] }
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/getPlaylist"))
            .and(query_param("id", "p1"))
            .respond_with(ok(json!({
                "playlist": { "id": "p1", "name": "Morning", "entry": [{ "id": "s9", "title": "Sunrise" }] }
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        assert_eq!(client.random_songs(2).await.unwrap().len(), 2);

        let playlists = client.playlists().await.unwrap();
        assert_eq!(playlists[0].song_count, Some(12));

        let playlist = client.playlist("p1").await.unwrap();
        assert_eq!(playlist.entry[0].title, "Sunrise");
    }

    #[tokio::test]
    async fn test_user_is_looked_up_by_own_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getUser"))
            .and(query_param("username", "alice"))
            .respond_with(ok(json!({
                "user": { "username": "alice", "scrobblingEnabled": true, "adminRole": false }
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let user = client.user().await.unwrap();

        assert_eq!(user.username, "alice");
        assert!(user.scrobbling_enabled);
    }
}

// =============================================================================
// Annotation Tests
// =============================================================================

mod annotation {
    use super::*;

    #[tokio::test]
    async fn test_star_and_unstar() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/star"))
            .and(query_param("id", "s1"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/unstar"))
            .and(query_param("id", "s1"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.star("s1").await.unwrap();
        client.unstar("s1").await.unwrap();
    }

    #[tokio::test]
    async fn test_progress_notification_is_a_submission_scrobble() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/scrobble"))
            .and(query_param("id", "s1"))
            .and(query_param("submission", "true"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.notify_playback_progress("s1", true).await.unwrap();
    }

    #[tokio::test]
    async fn test_scrobble_failure_maps_to_gateway_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/scrobble"))
            .respond_with(failed(0, "Scrobbling disabled"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        match client.notify_playback_progress("s1", false).await {
            Err(PlaybackError::Gateway(message)) => assert!(message.contains("Scrobbling disabled")),
            other => panic!("Expected Gateway error, got: {:?}", other),
        }
    }
}

// =============================================================================
// Media Gateway Tests
// =============================================================================

mod gateway {
    use super::*;

    #[tokio::test]
    async fn test_stream_location_is_authenticated() {
        let mock_server = MockServer::start().await;
        let client = client_for(&mock_server);

        let url = client.stream_location("s1");

        assert!(url.as_str().starts_with(&mock_server.uri()));
        assert_eq!(url.path(), "/rest/stream");
        assert!(url.query_pairs().any(|(k, v)| k == "id" && v == "s1"));
        assert!(url.query_pairs().any(|(k, v)| k == "u" && v == "alice"));
    }

    #[tokio::test]
    async fn test_fetch_lyrics_expands_structured_lines() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getLyricsBySongId"))
            .and(query_param("id", "s1"))
            .respond_with(ok(json!({
                "lyricsList": { "structuredLyrics": [{
                    "lang": "eng",
                    "synced": true,
                    "line": [
                        { "start": 1000, "value": "In the next world war" },
                        { "start": 5000, "value": "In a jackknifed juggernaut\nI am born again" }
                    ]
                }]}
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let lyrics = client.fetch_lyrics("s1").await.unwrap();

        assert!(lyrics.synced);
        assert_eq!(lyrics.lines.len(), 3);
        assert_eq!(lyrics.lines[2].text, "I am born again");
        assert_eq!(lyrics.lines[2].start, Some(Duration::from_millis(5000)));
    }

    #[tokio::test]
    async fn test_fetch_lyrics_without_lyrics_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getLyricsBySongId"))
            .respond_with(ok(json!({ "lyricsList": {} })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(matches!(
            client.fetch_lyrics("s1").await,
            Err(PlaybackError::Gateway(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_artwork_returns_bytes() {
        let mock_server = MockServer::start().await;
        let image = vec![0x89, b'P', b'N', b'G', 1, 2, 3];

        Mock::given(method("GET"))
            .and(path("/rest/getCoverArt"))
            .and(query_param("id", "al-7"))
            .and(query_param("size", "300"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(image.clone(), "image/png"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert_eq!(client.fetch_artwork("al-7", 300).await.unwrap(), image);
    }

    #[tokio::test]
    async fn test_fetch_artwork_error_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/getCoverArt"))
            .respond_with(failed(70, "Artwork not found"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(matches!(
            client.cover_art("missing", 300).await,
            Err(SubsonicError::Api { code: 70, .. })
        ));
    }
}
