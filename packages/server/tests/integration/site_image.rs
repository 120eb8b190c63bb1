use std::path::Path;

use crate::common::{MAX_BLOB_SIZE, TestApp, routes};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

fn stored_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| {
                    let path = entry.path();
                    if path.is_dir() { stored_files(&path) } else { 1 }
                })
                .sum()
        })
        .unwrap_or(0)
}

mod site_images {
    use super::*;

    #[tokio::test]
    async fn gallery_upload_is_listed_and_served() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .upload_with_token(
                routes::ADMIN_SITE_IMAGES,
                "meta.png",
                PNG_BYTES.to_vec(),
                &[
                    ("section", "galeria"),
                    ("category", "carreras"),
                    ("alt_text", "Meta del maratón"),
                    ("sort_order", "3"),
                ],
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["section"], "galeria");
        assert_eq!(res.body["category"], "carreras");
        assert_eq!(res.body["sort_order"], 3);
        let image_url = res.body["image_url"].as_str().unwrap().to_string();
        assert!(image_url.starts_with("/media/site-images/galeria/"));
        assert!(image_url.ends_with(".png"));

        let list = app.get_without_token(&routes::site_images("galeria")).await;
        assert_eq!(list.status, 200);
        assert_eq!(list.body.as_array().unwrap().len(), 1);

        let (status, content_type, bytes) = app.get_bytes(&image_url).await;
        assert_eq!(status, 200);
        assert_eq!(content_type.as_deref(), Some("image/png"));
        assert_eq!(bytes, PNG_BYTES);
    }

    #[tokio::test]
    async fn home_images_drop_the_category() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .upload_with_token(
                routes::ADMIN_SITE_IMAGES,
                "hero.jpg",
                PNG_BYTES.to_vec(),
                &[("section", "home"), ("category", "carreras")],
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["category"].is_null());
    }

    #[tokio::test]
    async fn rejected_metadata_stores_nothing() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let unknown_section = app
            .upload_with_token(
                routes::ADMIN_SITE_IMAGES,
                "x.png",
                PNG_BYTES.to_vec(),
                &[("section", "portada")],
                &token,
            )
            .await;
        assert_eq!(unknown_section.status, 400);
        assert_eq!(unknown_section.body["code"], "VALIDATION_ERROR");

        let missing_category = app
            .upload_with_token(
                routes::ADMIN_SITE_IMAGES,
                "x.png",
                PNG_BYTES.to_vec(),
                &[("section", "galeria")],
                &token,
            )
            .await;
        assert_eq!(missing_category.status, 400);

        assert_eq!(stored_files(app.media_dir.path()), 0);
        let list = app.get_without_token(&routes::site_images("galeria")).await;
        assert_eq!(list.body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn non_image_files_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .upload_with_token(
                routes::ADMIN_SITE_IMAGES,
                "notes.pdf",
                b"%PDF-1.7".to_vec(),
                &[("section", "home")],
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn listing_requires_a_known_section() {
        let app = TestApp::spawn().await;

        let unknown = app.get_without_token(&routes::site_images("portada")).await;
        assert_eq!(unknown.status, 400);

        let missing = app.get_without_token(routes::SITE_IMAGES).await;
        assert_eq!(missing.status, 400);
        assert_eq!(missing.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn images_are_ordered_by_position() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        for (name, order) in [("b.png", "2"), ("a.png", "1")] {
            let res = app
                .upload_with_token(
                    routes::ADMIN_SITE_IMAGES,
                    name,
                    PNG_BYTES.to_vec(),
                    &[("section", "home"), ("alt_text", name), ("sort_order", order)],
                    &token,
                )
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let list = app.get_without_token(&routes::site_images("home")).await;
        let alts: Vec<&str> = list
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["alt_text"].as_str().unwrap())
            .collect();
        assert_eq!(alts, ["a.png", "b.png"]);
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let created = app
            .upload_with_token(
                routes::ADMIN_SITE_IMAGES,
                "hero.webp",
                PNG_BYTES.to_vec(),
                &[("section", "home")],
                &token,
            )
            .await;
        let id = created.id();

        let res = app
            .delete_with_token(&routes::admin_site_image(id), &token)
            .await;
        assert_eq!(res.status, 204);

        let list = app.get_without_token(&routes::site_images("home")).await;
        assert_eq!(list.body, serde_json::json!([]));

        let again = app
            .delete_with_token(&routes::admin_site_image(id), &token)
            .await;
        assert_eq!(again.status, 404);
    }
}

mod uploads {
    use super::*;

    #[tokio::test]
    async fn member_photo_upload_returns_a_public_url() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .upload_with_token(
                &routes::upload("member-photos"),
                "ana.JPG",
                PNG_BYTES.to_vec(),
                &[],
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let key = res.body["key"].as_str().unwrap();
        assert!(key.starts_with("member-photos/"));
        assert!(key.ends_with(".jpg"));
        assert_eq!(res.body["url"], format!("/media/{key}"));

        let (status, content_type, _) = app.get_bytes(&format!("/media/{key}")).await;
        assert_eq!(status, 200);
        assert_eq!(content_type.as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn unknown_bucket_returns_404() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .upload_with_token(
                &routes::upload("secrets"),
                "x.png",
                PNG_BYTES.to_vec(),
                &[],
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn oversized_image_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let too_big = vec![0u8; MAX_BLOB_SIZE as usize + 1024];

        let res = app
            .upload_with_token(
                &routes::upload("blog-covers"),
                "cover.png",
                too_big,
                &[],
                &token,
            )
            .await;

        assert_eq!(res.status, 413);
        assert_eq!(res.body["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(stored_files(app.media_dir.path()), 0);
    }

    #[tokio::test]
    async fn upload_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .upload_with_token(
                &routes::upload("gear-images"),
                "x.png",
                PNG_BYTES.to_vec(),
                &[],
                "bogus",
            )
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn missing_media_returns_404() {
        let app = TestApp::spawn().await;

        let (status, _, _) = app
            .get_bytes("/media/member-photos/0197a000-0000-7000-8000-000000000000.png")
            .await;
        assert_eq!(status, 404);

        let (traversal, _, _) = app.get_bytes("/media/..%2Fsecret.png").await;
        assert_eq!(traversal, 404);
    }
}
