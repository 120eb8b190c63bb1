use serde_json::json;

use crate::common::{TestApp, routes};

fn post_body(title: &str, published: bool) -> serde_json::Value {
    json!({
        "title": title,
        "author": "Coach Ramírez",
        "content": "Kilómetro a kilómetro.",
        "published": published,
    })
}

mod create {
    use super::*;

    #[tokio::test]
    async fn slug_is_derived_from_the_title() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ADMIN_BLOG_POSTS,
                &post_body("Mi primer maratón de Boston", true),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["slug"], "mi-primer-maraton-de-boston");
        assert_eq!(res.body["category"], "General");
        assert!(res.body["published_at"].is_string());
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected_and_the_original_is_untouched() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let original = app.create_blog_post(&token, "Boston 2024", true).await;

        let mut body = post_body("Otra historia", true);
        body["slug"] = json!("boston-2024");
        let res = app
            .post_with_token(routes::ADMIN_BLOG_POSTS, &body, &token)
            .await;

        assert_eq!(res.status, 409, "{}", res.text);
        assert_eq!(res.body["code"], "SLUG_TAKEN");

        let existing = app
            .get_with_token(&routes::admin_blog_post(original), &token)
            .await;
        assert_eq!(existing.body["title"], "Boston 2024");
        assert_eq!(existing.body["slug"], "boston-2024");
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let mut body = post_body("Post", false);
        body["category"] = json!("Chismes");
        let res = app
            .post_with_token(routes::ADMIN_BLOG_POSTS, &body, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn invalid_manual_slug_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let mut body = post_body("Post", false);
        body["slug"] = json!("Not A Slug");
        let res = app
            .post_with_token(routes::ADMIN_BLOG_POSTS, &body, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod publishing {
    use super::*;

    #[tokio::test]
    async fn drafts_are_hidden_from_the_public_site() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.create_blog_post(&token, "Borrador", false).await;
        app.create_blog_post(&token, "Publicado", true).await;

        let list = app.get_without_token(routes::BLOG_POSTS).await;
        let titles: Vec<&str> = list
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["Publicado"]);

        let draft = app.get_without_token(&routes::blog_post("borrador")).await;
        assert_eq!(draft.status, 404);

        let admin_list = app
            .get_with_token(routes::ADMIN_BLOG_POSTS, &token)
            .await;
        assert_eq!(admin_list.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn published_at_is_stamped_kept_and_cleared() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_blog_post(&token, "Rituales", false).await;
        let path = routes::admin_blog_post(id);

        let draft = app.get_with_token(&path, &token).await;
        assert!(draft.body["published_at"].is_null());

        let published = app
            .put_with_token(&path, &post_body("Rituales", true), &token)
            .await;
        assert_eq!(published.status, 200, "{}", published.text);
        let stamped = published.body["published_at"].clone();
        assert!(stamped.is_string());

        let resaved = app
            .put_with_token(&path, &post_body("Rituales de carrera", true), &token)
            .await;
        assert_eq!(resaved.body["published_at"], stamped);
        assert_eq!(resaved.body["slug"], "rituales-de-carrera");

        let unpublished = app
            .put_with_token(&path, &post_body("Rituales de carrera", false), &token)
            .await;
        assert!(unpublished.body["published_at"].is_null());
    }

    #[tokio::test]
    async fn published_post_is_readable_by_slug() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.create_blog_post(&token, "Guía para tu primer 10K", true)
            .await;

        let res = app
            .get_without_token(&routes::blog_post("guia-para-tu-primer-10k"))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "Guía para tu primer 10K");
    }
}

mod update_and_delete {
    use super::*;

    #[tokio::test]
    async fn renaming_onto_another_posts_slug_conflicts() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.create_blog_post(&token, "Primero", true).await;
        let second = app.create_blog_post(&token, "Segundo", true).await;

        let mut body = post_body("Segundo", true);
        body["slug"] = json!("primero");
        let res = app
            .put_with_token(&routes::admin_blog_post(second), &body, &token)
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "SLUG_TAKEN");
    }

    #[tokio::test]
    async fn delete_removes_the_post_from_the_public_list() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_blog_post(&token, "Efímero", true).await;

        let listed = app.get_without_token(routes::BLOG_POSTS).await;
        assert_eq!(listed.body.as_array().unwrap().len(), 1);

        let res = app
            .delete_with_token(&routes::admin_blog_post(id), &token)
            .await;
        assert_eq!(res.status, 204);

        let after = app.get_without_token(routes::BLOG_POSTS).await;
        assert_eq!(after.body, json!([]));
    }
}
