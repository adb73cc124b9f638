/// Closed set of difficulty labels the model may choose from.
pub const DIFFICULTY_LABELS: [&str; 3] = ["beginner", "intermediate", "advanced"];

/// Builds the generation instruction for one building. Same inputs, same text.
pub fn building_entry_prompt(building_name: &str, style: &str) -> String {
    format!(
        r#"Generate a complete JSON entry for this building for an architecture learning app:

Building: {building_name}
Style: {style}

Return ONLY valid JSON in this exact format (no markdown, no explanation):
{{
  "id": "kebab-case-id",
  "name": "{building_name}",
  "image_url": "/images/kebab-case-id.jpg",
  "style": "{style}",
  "style_distractors": ["distractor1", "distractor2", "distractor3"],
  "era": "start-end years",
  "style_explanation": "2-3 sentence explanation of why this building exemplifies this style",
  "engineering_question": "Question about a structural/engineering feature",
  "engineering_answer": "Correct answer (2-5 words)",
  "engineering_distractors": ["wrong1", "wrong2", "wrong3"],
  "engineering_explanation": "2-3 sentence explanation of the engineering feature",
  "fun_facts": [
    "Fact 1",
    "Fact 2",
    "Fact 3",
    "Fact 4"
  ],
  "difficulty": "beginner"
}}

Rules:
- Style distractors must be plausible but wrong architectural styles
- Engineering question should be specific to this building's innovations
- Engineering distractors must be plausible but incorrect
- Fun facts should be interesting, factual, and varied
- Era should be construction dates or period
- ID should be lowercase with hyphens (e.g., "hagia-sophia")
- Difficulty: "{beginner}" for famous buildings, "{intermediate}" for moderately known, "{advanced}" for specialist knowledge"#,
        beginner = DIFFICULTY_LABELS[0],
        intermediate = DIFFICULTY_LABELS[1],
        advanced = DIFFICULTY_LABELS[2],
    )
}
