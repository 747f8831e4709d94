use lessonmark_engine::{Lesson, Problem, TextItem};

/// Plain-text lines showing a whole lesson in the content pane.
pub fn lesson_lines(lesson: &Lesson, fallback_title: &str) -> Vec<String> {
    // Metadata values are stored HTML-escaped.
    let title = lesson
        .title()
        .map(|title| html_escape::decode_html_entities(title).into_owned())
        .unwrap_or_else(|| fallback_title.to_string());
    let mut lines = vec![title, String::new()];

    if lesson.problems().is_empty() {
        lines.push("(no problems in this lesson)".to_string());
        return lines;
    }

    for (i, problem) in lesson.problems().iter().enumerate() {
        problem_lines(&mut lines, i + 1, problem);
        lines.push(String::new());
    }

    lines
}

fn problem_lines(lines: &mut Vec<String>, number: usize, problem: &Problem) {
    lines.push(format!("#{number} [{}]", title_case(problem.question_type().as_str())));

    push_item(lines, "", problem.intro());
    push_item(lines, "? ", problem.question());
    for answer in problem.right_answers() {
        push_item(lines, "✓ ", answer);
    }
    for answer in problem.wrong_answers() {
        push_item(lines, "✗ ", answer);
    }
    push_item(lines, "» ", problem.explanation());

    let missing: Vec<_> = problem
        .question()
        .missing_words()
        .iter()
        .map(|word| word.as_deref().unwrap_or("_"))
        .collect();
    if !missing.is_empty() {
        lines.push(format!("Missing words: {}", missing.join(", ")));
    }
}

fn push_item(lines: &mut Vec<String>, prefix: &str, item: &TextItem) {
    if item.is_empty() {
        return;
    }
    let text = item.plain_text();
    let mut text_lines = text.lines();
    if let Some(first) = text_lines.next() {
        lines.push(format!("{prefix}{first}"));
    }
    let indent = " ".repeat(prefix.chars().count());
    lines.extend(text_lines.map(|line| format!("{indent}{line}")));
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_each_problem_as_plain_text() {
        let lesson = Lesson::create_from_source(
            "Title: Animals\n(i) Look *closely*\n(?) The ...cat sat\nthen 123\n(=) yes\n(x) no\n(&) Because\n",
        );

        assert_eq!(
            lesson_lines(&lesson, "animals"),
            vec![
                "Animals",
                "",
                "#1 [Simple]",
                "Look closely",
                "? The ... sat",
                "  then ...",
                "✓ yes",
                "✗ no",
                "» Because",
                "Missing words: cat, _",
                "",
            ]
        );
    }

    #[test]
    fn title_is_shown_unescaped() {
        let lesson = Lesson::create_from_source("Title: R&D <basics>\n(?) Ready?\n");
        assert_eq!(lesson_lines(&lesson, "rnd")[0], "R&D <basics>");
    }

    #[test]
    fn empty_lesson_uses_the_fallback_title() {
        let lesson = Lesson::create_from_source("just notes\n");
        assert_eq!(
            lesson_lines(&lesson, "notes"),
            vec!["notes", "", "(no problems in this lesson)"]
        );
    }
}
