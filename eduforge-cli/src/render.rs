//! Terminal rendering of pipeline results.
//!
//! Every track renders in both states: structured output shows typed fields,
//! unparsed output shows a visible "could not parse" banner followed by the
//! raw backend text, never a blank section.

use eduforge_core::types::{
    GenerationOutcome, MaterialCollection, PipelineResult, ProjectCollection, Quiz,
    StructuredContent,
};

const WRAP_WIDTH: usize = 76;

/// Render a complete pipeline result as displayable text.
pub fn render_result(result: &PipelineResult) -> String {
    let mut out = String::new();
    render_track(&mut out, "Learning Materials", &result.materials);
    render_track(&mut out, "Knowledge Quiz", &result.quiz);
    render_track(&mut out, "Suggested Projects", &result.projects);
    out
}

fn render_track(out: &mut String, heading: &str, outcome: &GenerationOutcome) {
    out.push_str(&format!("\n== {} ==\n\n", heading));
    match outcome {
        GenerationOutcome::Structured(content) => render_structured(out, content),
        GenerationOutcome::Unparsed { raw, detail } => render_unparsed(out, raw, detail),
    }
}

fn render_structured(out: &mut String, content: &StructuredContent) {
    match content {
        StructuredContent::Materials(collection) => render_materials(out, collection),
        StructuredContent::Quiz(quiz) => render_quiz(out, quiz),
        StructuredContent::Projects(collection) => render_projects(out, collection),
    }
}

fn render_unparsed(out: &mut String, raw: &str, detail: &str) {
    out.push_str(&format!("[could not parse output: {}]\n", detail));
    if raw.trim().is_empty() {
        out.push_str("(no raw output to display)\n");
    } else {
        out.push_str("Raw output:\n");
        out.push_str(raw);
        out.push('\n');
    }
}

fn render_materials(out: &mut String, collection: &MaterialCollection) {
    if collection.materials.is_empty() {
        out.push_str("No materials were suggested.\n");
        return;
    }
    for material in &collection.materials {
        out.push_str(&format!("* {} [{}]\n", material.title, material.kind));
        out.push_str(&format!("  {}\n", material.url));
        out.push_str(&indent_wrap(&material.description, "  "));
        out.push('\n');
    }
}

fn render_quiz(out: &mut String, quiz: &Quiz) {
    if quiz.questions.is_empty() {
        out.push_str("No questions were generated.\n");
        return;
    }
    for (i, question) in quiz.questions.iter().enumerate() {
        out.push_str(&format!("Question {}: {}\n", i + 1, question.question));
        for (j, option) in question.options.iter().enumerate() {
            // correct_answer is 0-based; display numbering starts at 1
            let marker = if j == question.correct_answer { " *" } else { "" };
            out.push_str(&format!("  {}. {}{}\n", j + 1, option, marker));
        }
        out.push_str(&indent_wrap(
            &format!("Explanation: {}", question.explanation),
            "  ",
        ));
        out.push('\n');
    }
}

fn render_projects(out: &mut String, collection: &ProjectCollection) {
    if collection.projects.is_empty() {
        out.push_str("No projects were suggested.\n");
        return;
    }
    for project in &collection.projects {
        out.push_str(&format!(
            "* {} ({}, {})\n",
            project.title, project.difficulty, project.estimated_duration
        ));
        out.push_str(&indent_wrap(&project.description, "  "));
        if !project.required_skills.is_empty() {
            out.push_str(&format!(
                "  Skills: {}\n",
                project.required_skills.join(", ")
            ));
        }
        if !project.learning_outcomes.is_empty() {
            out.push_str(&format!(
                "  Outcomes: {}\n",
                project.learning_outcomes.join(", ")
            ));
        }
        out.push('\n');
    }
}

fn indent_wrap(text: &str, indent: &str) -> String {
    let options = textwrap::Options::new(WRAP_WIDTH)
        .initial_indent(indent)
        .subsequent_indent(indent);
    let mut wrapped = textwrap::fill(text, options);
    wrapped.push('\n');
    wrapped
}
