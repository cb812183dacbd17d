use once_cell::sync::Lazy;
use regex::Regex;
use select::{
    document::Document,
    predicate::{And, Attr, Name},
};

static TITLE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"tt\d{7,10}").unwrap());

#[derive(Debug)]
pub struct PosterExtractor {}

impl PosterExtractor {
    /// IMDb title id (`tt` followed by digits) found in a record URL.
    pub fn extract_title_id(url: &str) -> Option<String> {
        TITLE_ID.find(url).map(|m| m.as_str().to_string())
    }

    pub fn extract_poster_url(title_page_html: &str) -> Option<String> {
        let document = Document::from(title_page_html);

        document
            .find(And(Name("meta"), Attr("property", "og:image")))
            .filter_map(|n| n.attr("content"))
            .chain(
                document
                    .find(And(Name("link"), Attr("rel", "image_src")))
                    .filter_map(|n| n.attr("href")),
            )
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_id_is_pulled_out_of_the_url() {
        assert_eq!(
            PosterExtractor::extract_title_id("https://www.imdb.com/title/tt0111161/"),
            Some("tt0111161".to_string())
        );
        assert_eq!(
            PosterExtractor::extract_title_id("https://www.imdb.com/title/tt15398776"),
            Some("tt15398776".to_string())
        );
        assert_eq!(PosterExtractor::extract_title_id("https://example.com/x"), None);
    }

    #[test]
    fn poster_comes_from_open_graph_image() {
        let html = r#"<html><head>
            <meta property="og:title" content="Heat (1995)">
            <meta property="og:image" content="https://m.media-amazon.com/images/heat.jpg">
            </head><body></body></html>"#;

        assert_eq!(
            PosterExtractor::extract_poster_url(html),
            Some("https://m.media-amazon.com/images/heat.jpg".to_string())
        );
    }

    #[test]
    fn falls_back_to_image_src_link() {
        let html = r#"<html><head>
            <meta property="og:image" content="  ">
            <link rel="image_src" href="https://img.example/poster.png">
            </head></html>"#;

        assert_eq!(
            PosterExtractor::extract_poster_url(html),
            Some("https://img.example/poster.png".to_string())
        );
        assert_eq!(PosterExtractor::extract_poster_url("<html></html>"), None);
    }
}
