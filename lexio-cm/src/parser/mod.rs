//! WordPress eXtended RSS (WXR) ingestion and entity reconstruction
//!
//! Three phases, all in memory:
//! 1. Flattening — every `<item>` becomes one raw [`WpPost`] (see `reader`)
//! 2. Classification — posts are promoted to typed entities by post type
//! 3. Linking — child wpIds are threaded into parent child-lists
//!
//! Classification runs to completion before linking, so a child appearing
//! before its parent in document order still links correctly. A reference
//! to a wpId that was never classified is dropped with a warning.

mod classify;
mod reader;
pub mod types;

pub use classify::{match_rules, parent_ref, question_type_from_code, SubstringRule};

use classify::{
    meta_alias, ANSWER_DATA_ALIASES, COURSE_ID_ALIASES, DEFAULT_LANGUAGE, DEFAULT_LESSON_TYPE,
    DEFAULT_QUIZ_TYPE, DEFAULT_TOPIC_TYPE, LANGUAGE_RULES, LESSON_ID_ALIASES, LESSON_TYPE_RULES,
    QUESTION_TYPE_ALIASES, QUIZ_ID_ALIASES, QUIZ_TYPE_RULES, TOPIC_ID_ALIASES, TOPIC_TYPE_RULES,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use types::{
    ParsedCourse, ParsedLesson, ParsedQuestion, ParsedQuiz, ParsedTopic, WpAuthor, WpCategory,
    WpGroup, WpPost,
};

/// Fatal ingestion errors; everything past the XML itself degrades to
/// defaults instead of failing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Map keyed by wpId that iterates in document (insertion) order
#[derive(Debug)]
pub struct WpIdMap<T> {
    items: HashMap<i64, T>,
    order: Vec<i64>,
}

impl<T> Default for WpIdMap<T> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T> WpIdMap<T> {
    pub fn insert(&mut self, wp_id: i64, value: T) {
        if self.items.insert(wp_id, value).is_none() {
            self.order.push(wp_id);
        }
    }

    pub fn get(&self, wp_id: i64) -> Option<&T> {
        self.items.get(&wp_id)
    }

    fn get_mut(&mut self, wp_id: i64) -> Option<&mut T> {
        self.items.get_mut(&wp_id)
    }

    pub fn contains(&self, wp_id: i64) -> bool {
        self.items.contains_key(&wp_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate `(wp_id, value)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &T)> {
        self.order.iter().map(move |id| (*id, &self.items[id]))
    }
}

/// Single-pass WXR parser producing typed, cross-referenced collections.
///
/// After [`WxrParser::parse_file`] resolves the parser performs no further
/// mutation; accessors return read-only snapshots keyed by original wpId.
#[derive(Debug, Default)]
pub struct WxrParser {
    authors: Vec<WpAuthor>,
    categories: Vec<WpCategory>,
    posts: WpIdMap<WpPost>,
    courses: WpIdMap<ParsedCourse>,
    lessons: WpIdMap<ParsedLesson>,
    topics: WpIdMap<ParsedTopic>,
    quizzes: WpIdMap<ParsedQuiz>,
    questions: WpIdMap<ParsedQuestion>,
    groups: WpIdMap<WpGroup>,
}

impl WxrParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a WXR file and populate the internal maps.
    ///
    /// Fatal only when the file cannot be read or the XML is malformed; a
    /// structurally valid but empty channel produces empty maps.
    pub fn parse_file(&mut self, path: &Path) -> Result<(), ParseError> {
        let doc = reader::read_wxr(path)?;

        tracing::info!(
            authors = doc.authors.len(),
            categories = doc.categories.len(),
            items = doc.posts.len(),
            "WXR document flattened"
        );

        self.authors = doc.authors;
        self.categories = doc.categories;
        for post in doc.posts {
            let wp_id = post.id;
            self.classify(&post);
            self.posts.insert(wp_id, post);
        }
        self.link();

        tracing::info!(
            courses = self.courses.len(),
            lessons = self.lessons.len(),
            topics = self.topics.len(),
            quizzes = self.quizzes.len(),
            questions = self.questions.len(),
            groups = self.groups.len(),
            "posts classified"
        );

        Ok(())
    }

    /// Promote one raw post to its typed entity, if the post type is known
    fn classify(&mut self, post: &WpPost) {
        match post.post_type.as_str() {
            "sfwd-courses" => {
                self.courses.insert(
                    post.id,
                    ParsedCourse {
                        wp_id: post.id,
                        title: post.title.clone(),
                        description: if post.excerpt.trim().is_empty() {
                            post.content.clone()
                        } else {
                            post.excerpt.clone()
                        },
                        author: post.author.clone(),
                        language: match_rules(&post.title, LANGUAGE_RULES, DEFAULT_LANGUAGE),
                        created_at: post.created_at,
                        lessons: Vec::new(),
                    },
                );
            }
            "sfwd-lessons" => {
                self.lessons.insert(
                    post.id,
                    ParsedLesson {
                        wp_id: post.id,
                        title: post.title.clone(),
                        content: post.content.clone(),
                        author: post.author.clone(),
                        lesson_type: match_rules(&post.title, LESSON_TYPE_RULES, DEFAULT_LESSON_TYPE),
                        course_id: parent_ref(&post.meta, COURSE_ID_ALIASES),
                        created_at: post.created_at,
                        topics: Vec::new(),
                    },
                );
            }
            "sfwd-topic" => {
                // Shortcode-bearing topics keep their raw content for the
                // interactive player
                let interactive = post.content.contains("[h5p") || post.content.contains("[quiz");
                let haystack = format!("{} {}", post.title, post.content);
                self.topics.insert(
                    post.id,
                    ParsedTopic {
                        wp_id: post.id,
                        title: post.title.clone(),
                        content: post.content.clone(),
                        topic_type: match_rules(&haystack, TOPIC_TYPE_RULES, DEFAULT_TOPIC_TYPE),
                        lesson_id: parent_ref(&post.meta, LESSON_ID_ALIASES),
                        interactive_data: interactive.then(|| post.content.clone()),
                        created_at: post.created_at,
                    },
                );
            }
            "sfwd-quiz" => {
                self.quizzes.insert(
                    post.id,
                    ParsedQuiz {
                        wp_id: post.id,
                        title: post.title.clone(),
                        description: post.content.clone(),
                        quiz_type: match_rules(&post.title, QUIZ_TYPE_RULES, DEFAULT_QUIZ_TYPE),
                        lesson_id: parent_ref(&post.meta, LESSON_ID_ALIASES),
                        topic_id: parent_ref(&post.meta, TOPIC_ID_ALIASES),
                        created_at: post.created_at,
                        questions: Vec::new(),
                    },
                );
            }
            "sfwd-question" => {
                let answer_options = meta_alias(&post.meta, ANSWER_DATA_ALIASES)
                    .and_then(|raw| serde_json::from_str(raw).ok())
                    .unwrap_or_default();
                self.questions.insert(
                    post.id,
                    ParsedQuestion {
                        wp_id: post.id,
                        title: post.title.clone(),
                        question_text: if post.content.trim().is_empty() {
                            post.title.clone()
                        } else {
                            post.content.clone()
                        },
                        question_type: question_type_from_code(meta_alias(
                            &post.meta,
                            QUESTION_TYPE_ALIASES,
                        )),
                        quiz_id: parent_ref(&post.meta, QUIZ_ID_ALIASES),
                        answer_options,
                    },
                );
            }
            "groups" => {
                self.groups.insert(
                    post.id,
                    WpGroup {
                        wp_id: post.id,
                        title: post.title.clone(),
                        description: post.content.clone(),
                    },
                );
            }
            // Unrecognized post types stay in the raw posts map only
            _ => {}
        }
    }

    /// Thread child wpIds into parent child-lists, in document order.
    ///
    /// Runs after classification of every post, so declaration order in the
    /// XML does not matter. Child lists only ever contain wpIds present in
    /// the respective child map.
    fn link(&mut self) {
        let lesson_links: Vec<(i64, i64)> = self
            .lessons
            .iter()
            .filter_map(|(id, lesson)| lesson.course_id.map(|course| (id, course)))
            .collect();
        for (lesson_id, course_id) in lesson_links {
            match self.courses.get_mut(course_id) {
                Some(course) => course.lessons.push(lesson_id),
                None => tracing::warn!(
                    lesson = lesson_id,
                    course = course_id,
                    "lesson references a course that was never classified"
                ),
            }
        }

        let topic_links: Vec<(i64, i64)> = self
            .topics
            .iter()
            .filter_map(|(id, topic)| topic.lesson_id.map(|lesson| (id, lesson)))
            .collect();
        for (topic_id, lesson_id) in topic_links {
            match self.lessons.get_mut(lesson_id) {
                Some(lesson) => lesson.topics.push(topic_id),
                None => tracing::warn!(
                    topic = topic_id,
                    lesson = lesson_id,
                    "topic references a lesson that was never classified"
                ),
            }
        }

        let question_links: Vec<(i64, i64)> = self
            .questions
            .iter()
            .filter_map(|(id, question)| question.quiz_id.map(|quiz| (id, quiz)))
            .collect();
        for (question_id, quiz_id) in question_links {
            match self.quizzes.get_mut(quiz_id) {
                Some(quiz) => quiz.questions.push(question_id),
                None => tracing::warn!(
                    question = question_id,
                    quiz = quiz_id,
                    "question references a quiz that was never classified"
                ),
            }
        }
    }

    pub fn authors(&self) -> &[WpAuthor] {
        &self.authors
    }

    pub fn author_by_login(&self, login: &str) -> Option<&WpAuthor> {
        self.authors.iter().find(|a| a.login == login)
    }

    pub fn categories(&self) -> &[WpCategory] {
        &self.categories
    }

    pub fn posts(&self) -> &WpIdMap<WpPost> {
        &self.posts
    }

    pub fn courses(&self) -> &WpIdMap<ParsedCourse> {
        &self.courses
    }

    pub fn lessons(&self) -> &WpIdMap<ParsedLesson> {
        &self.lessons
    }

    pub fn topics(&self) -> &WpIdMap<ParsedTopic> {
        &self.topics
    }

    pub fn quizzes(&self) -> &WpIdMap<ParsedQuiz> {
        &self.quizzes
    }

    pub fn questions(&self) -> &WpIdMap<ParsedQuestion> {
        &self.questions
    }

    pub fn groups(&self) -> &WpIdMap<WpGroup> {
        &self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::types::*;
    use super::*;
    use std::io::Write;

    fn parse_fixture(xml: &str) -> WxrParser {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(xml.as_bytes()).expect("write fixture");
        let mut parser = WxrParser::new();
        parser.parse_file(file.path()).expect("parse");
        parser
    }

    fn item(id: i64, post_type: &str, title: &str, meta: &[(&str, &str)]) -> String {
        let meta_xml: String = meta
            .iter()
            .map(|(k, v)| {
                format!(
                    "<wp:postmeta><wp:meta_key>{k}</wp:meta_key><wp:meta_value>{v}</wp:meta_value></wp:postmeta>"
                )
            })
            .collect();
        format!(
            "<item><title>{title}</title><wp:post_id>{id}</wp:post_id>\
             <wp:post_type>{post_type}</wp:post_type><wp:status>publish</wp:status>{meta_xml}</item>"
        )
    }

    fn wrap(items: &str) -> String {
        format!(r#"<?xml version="1.0"?><rss><channel>{items}</channel></rss>"#)
    }

    #[test]
    fn classifies_by_post_type_and_ignores_unknown() {
        let xml = wrap(&format!(
            "{}{}{}",
            item(1, "sfwd-courses", "German Basics", &[]),
            item(2, "attachment", "IMG_0001", &[]),
            item(3, "groups", "Riverside School", &[]),
        ));
        let parser = parse_fixture(&xml);

        assert_eq!(parser.courses().len(), 1);
        assert_eq!(parser.groups().len(), 1);
        // Unknown post types are retained raw but never promoted
        assert_eq!(parser.posts().len(), 3);
        assert!(parser.posts().contains(2));
        assert_eq!(parser.courses().get(1).unwrap().language, Language::German);
    }

    #[test]
    fn links_child_declared_before_parent() {
        // Lesson 20 appears before course 10 in document order
        let xml = wrap(&format!(
            "{}{}",
            item(20, "sfwd-lessons", "Story: Der Markt", &[("course_id", "10")]),
            item(10, "sfwd-courses", "German Stories", &[]),
        ));
        let parser = parse_fixture(&xml);

        assert_eq!(parser.courses().get(10).unwrap().lessons, vec![20]);
    }

    #[test]
    fn dangling_parent_reference_is_dropped() {
        let xml = wrap(&item(
            20,
            "sfwd-lessons",
            "Orphan lesson",
            &[("course_id", "999")],
        ));
        let parser = parse_fixture(&xml);

        assert_eq!(parser.lessons().len(), 1);
        assert_eq!(parser.lessons().get(20).unwrap().course_id, Some(999));
        // Not linked anywhere, but still parsed
        assert_eq!(parser.courses().len(), 0);
    }

    #[test]
    fn question_answer_json_defaults_to_empty_on_garbage() {
        let xml = wrap(&format!(
            "{}{}",
            item(
                30,
                "sfwd-question",
                "Pick one",
                &[
                    ("question_type", "single"),
                    ("quiz_id", "40"),
                    ("answer_data", "{not json"),
                ],
            ),
            item(40, "sfwd-quiz", "Vocabulary check", &[("lesson_id", "0")]),
        ));
        let parser = parse_fixture(&xml);

        let question = parser.questions().get(30).unwrap();
        assert_eq!(question.question_type, QuestionType::MultipleChoice);
        assert!(question.answer_options.is_empty());

        let quiz = parser.quizzes().get(40).unwrap();
        assert_eq!(quiz.quiz_type, QuizType::Vocabulary);
        assert_eq!(quiz.lesson_id, None, "zero sentinel means no parent");
        assert_eq!(quiz.questions, vec![30]);
    }

    #[test]
    fn topic_shortcode_sets_interactive_data() {
        let xml = wrap(&format!(
            "<item><title>Anagram fun</title><wp:post_id>50</wp:post_id>\
             <wp:post_type>sfwd-topic</wp:post_type>\
             <content:encoded><![CDATA[[h5p id=\"3\"]]]></content:encoded></item>{}",
            item(51, "sfwd-topic", "Plain reading", &[]),
        ));
        let parser = parse_fixture(&xml);

        assert!(parser.topics().get(50).unwrap().interactive_data.is_some());
        assert_eq!(parser.topics().get(50).unwrap().topic_type, TopicType::Anagram);
        assert!(parser.topics().get(51).unwrap().interactive_data.is_none());
        assert_eq!(parser.topics().get(51).unwrap().topic_type, TopicType::StoryPage);
    }
}
