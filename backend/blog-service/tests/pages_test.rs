//! Page rendering tests against the in-memory repository
#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use common::{at, Fixture};

async fn body_of(resp: actix_web::dev::ServiceResponse) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[actix_web::test]
async fn index_lists_at_most_five_posts_per_section() {
    let fixture = Fixture::new();
    let tag = fixture.repo.add_tag("travel");
    for i in 0..8 {
        fixture.post(&format!("post-{}", i), i, i as i64, &[tag]);
    }
    let app = blog_app!(fixture.repo.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;

    // recent listing: posts 7..=3
    assert_eq!(count(&body, "class=\"post-card\""), 5);
    assert!(body.contains("href=\"/post/post-7\""));
    assert!(!body.contains("Post post-0"));
    // popular sidebar: each of the five links appears once in the sidebar
    assert_eq!(count(&body, "<li><a href=\"/post/"), 5);
    // index assembles two post listings, regardless of the number of posts
    assert_eq!(fixture.repo.list_posts_calls(), 2);
}

#[actix_web::test]
async fn index_lists_five_most_used_tags() {
    let fixture = Fixture::new();
    let tags: Vec<_> = (0..8)
        .map(|i| fixture.repo.add_tag(&format!("tag{}", i)))
        .collect();
    // tag i is carried by 8 - i posts
    for (i, tag) in tags.iter().enumerate() {
        for n in 0..(8 - i) {
            fixture.post(&format!("p{}-{}", i, n), 0, (i * 10 + n) as i64, &[*tag]);
        }
    }
    let app = blog_app!(fixture.repo.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;

    let cloud_start = body.find("<ul class=\"tag-cloud\">").unwrap();
    let cloud = &body[cloud_start..];
    let cloud = &cloud[..cloud.find("</ul>").unwrap()];
    assert_eq!(count(cloud, "<li>"), 5);
    assert!(cloud.contains("#tag0"));
    assert!(cloud.contains("#tag4"));
    assert!(!cloud.contains("#tag5"));
}

#[actix_web::test]
async fn paginated_index_renders_home_page() {
    let fixture = Fixture::new();
    fixture.post("only", 0, 0, &[]);
    let app = blog_app!(fixture.repo.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/page/2").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_of(resp).await.contains("href=\"/post/only\""));
}

#[actix_web::test]
async fn post_detail_shows_body_likes_and_comments_in_order() {
    let fixture = Fixture::new();
    let tag = fixture.repo.add_tag("nature");
    let post = fixture.post("autumn", 3, 10, &[tag]);
    let reader = fixture.readers[0];
    fixture
        .repo
        .add_comment(post, reader, "second comment", at(2021, 3, 2));
    fixture
        .repo
        .add_comment(post, reader, "first comment", at(2021, 3, 1));
    let app = blog_app!(fixture.repo.clone());

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/post/autumn").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;

    assert!(body.contains("Text of Post autumn"));
    assert!(body.contains("лайков: 3"));
    assert!(body.contains("reader0"));
    let first = body.find("first comment").unwrap();
    let second = body.find("second comment").unwrap();
    assert!(first < second);
    assert!(body.contains("href=\"/tag/nature\""));
}

#[actix_web::test]
async fn unknown_slug_is_not_found() {
    let fixture = Fixture::new();
    let app = blog_app!(fixture.repo.clone());

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/post/missing").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_of(resp).await.contains("404 Not Found"));
}

#[actix_web::test]
async fn duplicate_slug_resolves_to_most_liked_post() {
    let fixture = Fixture::new();
    let tag = fixture.repo.add_tag("dup");
    fixture
        .repo
        .add_post("Less liked", "same", fixture.author, at(2021, 5, 1), &[tag]);
    let liked = fixture
        .repo
        .add_post("More liked", "same", fixture.author, at(2020, 5, 1), &[tag]);
    fixture.repo.add_likes(liked, &fixture.readers[..2]);
    let app = blog_app!(fixture.repo.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/post/same").to_request()).await;
    let body = body_of(resp).await;
    assert!(body.contains("<h1>More liked</h1>"));
}

#[actix_web::test]
async fn tag_page_lists_up_to_twenty_posts_by_likes() {
    let fixture = Fixture::new();
    let tag = fixture.repo.add_tag("travel");
    let other = fixture.repo.add_tag("food");
    for i in 0..22 {
        fixture.post(&format!("t{}", i), i % 11, i as i64, &[tag]);
    }
    fixture.post("untagged-food", 10, 100, &[other]);
    let app = blog_app!(fixture.repo.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/tag/travel").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;

    assert_eq!(count(&body, "class=\"post-card\""), 20);
    assert!(!body.contains("href=\"/post/untagged-food\"><img"));
    assert!(!body.contains("<h3><a href=\"/post/untagged-food\""));
    // t21 has 10 likes and is newer than t10, so it leads the listing
    let t21 = body.find("<h3><a href=\"/post/t21\"").unwrap();
    let t10 = body.find("<h3><a href=\"/post/t10\"").unwrap();
    assert!(t21 < t10);
}

#[actix_web::test]
async fn tag_page_with_fewer_posts_lists_all() {
    let fixture = Fixture::new();
    let tag = fixture.repo.add_tag("rare");
    fixture.post("a", 1, 1, &[tag]);
    fixture.post("b", 2, 2, &[tag]);
    let app = blog_app!(fixture.repo.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/tag/rare").to_request()).await;
    let body = body_of(resp).await;
    assert_eq!(count(&body, "class=\"post-card\""), 2);
}

#[actix_web::test]
async fn unknown_tag_is_not_found() {
    let fixture = Fixture::new();
    fixture.repo.add_tag("travel");
    let app = blog_app!(fixture.repo.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/tag/Travel").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn non_ascii_tag_titles_are_decoded() {
    let fixture = Fixture::new();
    let tag = fixture.repo.add_tag("путешествия");
    fixture.post("baikal", 0, 0, &[tag]);
    let app = blog_app!(fixture.repo.clone());

    let uri = format!("/tag/{}", urlencoding::encode("путешествия"));
    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_of(resp).await.contains("#путешествия"));
}

#[actix_web::test]
async fn post_without_tags_renders_without_tag_link() {
    let fixture = Fixture::new();
    fixture.post("lonely", 0, 0, &[]);
    let app = blog_app!(fixture.repo.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;
    assert!(body.contains("href=\"/post/lonely\""));
    assert!(!body.contains("post-card-tag"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/post/lonely").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn contacts_and_admin_pages() {
    let fixture = Fixture::new();
    let app = blog_app!(fixture.repo.clone());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/contacts/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_of(resp).await.contains("Sensive Test"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/admin/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_of(resp).await;
    assert!(body.contains("comments"));
    assert!(body.contains("text, author, post"));
}

#[actix_web::test]
async fn media_outside_root_is_not_found() {
    let fixture = Fixture::new();
    let app = blog_app!(fixture.repo.clone());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/media/missing.jpg").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
