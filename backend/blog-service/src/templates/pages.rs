use super::{format_date, layout, post_card, sidebar, tag_url};
use crate::admin::AdminRegistry;
use crate::services::{IndexContext, PostDetailContext, TagFilterContext};
use maud::{html, Markup};

pub fn index(site_title: &str, context: &IndexContext) -> Markup {
    let content = html! {
        div.page {
            section.content {
                h1 { "Свежие публикации" }
                @for post in &context.page_posts {
                    (post_card(post))
                }
                @if context.page_posts.is_empty() {
                    p.empty { "Пока нет ни одной публикации." }
                }
            }
            (sidebar(&context.most_popular_posts, &context.popular_tags))
        }
    };

    layout(site_title, "", content)
}

pub fn post_detail(site_title: &str, context: &PostDetailContext) -> Markup {
    let post = &context.post;
    let content = html! {
        div.page {
            article.post {
                h1 { (post.title) }
                p.post-meta {
                    (post.author) " · " (format_date(&post.published_at))
                    " · лайков: " (post.likes_amount)
                }
                @if let Some(image_url) = &post.image_url {
                    img.post-image src=(image_url) alt=(post.title);
                }
                @for paragraph in post.text.split('\n').filter(|p| !p.trim().is_empty()) {
                    p { (paragraph) }
                }
                @if !post.tags.is_empty() {
                    ul.post-tags {
                        @for tag in &post.tags {
                            li {
                                a href=(tag_url(&tag.title)) { "#" (tag.title) }
                                " (" (tag.posts_with_tag) ")"
                            }
                        }
                    }
                }
                section.comments {
                    h2 { "Комментарии (" (post.comments.len()) ")" }
                    @for comment in &post.comments {
                        div.comment {
                            p.comment-meta {
                                strong { (comment.author) }
                                " · " (format_date(&comment.published_at))
                            }
                            p.comment-text { (comment.text) }
                        }
                    }
                }
            }
            (sidebar(&context.most_popular_posts, &context.popular_tags))
        }
    };

    layout(site_title, &post.title, content)
}

/// Posts of one tag
pub fn posts_list(site_title: &str, context: &TagFilterContext) -> Markup {
    let heading = format!("#{}", context.tag);
    let content = html! {
        div.page {
            section.content {
                h1 { (heading) }
                @for post in &context.posts {
                    (post_card(post))
                }
            }
            (sidebar(&context.most_popular_posts, &context.popular_tags))
        }
    };

    layout(site_title, &heading, content)
}

pub fn contacts(site_title: &str) -> Markup {
    let content = html! {
        section.contacts {
            h1 { "Контакты" }
            p { "Есть вопрос, идея для статьи или предложение о сотрудничестве? Напишите нам." }
            ul {
                li { "Почта: " a href="mailto:team@sensive.dev" { "team@sensive.dev" } }
            }
        }
    };

    layout(site_title, "Контакты", content)
}

/// Read-only description of the admin registrations
pub fn admin_index(site_title: &str, registry: &AdminRegistry) -> Markup {
    let content = html! {
        section.admin {
            h1 { "Администрирование" }
            table {
                thead {
                    tr {
                        th { "Model" }
                        th { "List display" }
                        th { "Raw id fields" }
                        th { "Limited choices" }
                    }
                }
                tbody {
                    @for model in registry.models() {
                        tr {
                            td { (model.entity.verbose_name_plural()) }
                            td { (model.list_display.join(", ")) }
                            td { (model.raw_id_fields.join(", ")) }
                            td {
                                @for (field, filter) in &model.limit_choices_to {
                                    (field) ": " (format!("{:?}", filter))
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    layout(site_title, "Администрирование", content)
}
