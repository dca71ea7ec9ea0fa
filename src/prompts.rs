//! Role-scoped prompt for routine recommendations.
//!
//! The prompt pins the role up front, lists the inputs the model may use,
//! carries both rule blocks so the model can be told to ignore the other one,
//! and fixes a four-section output format.

use crate::routine::RoutineSnapshot;

const STUDENT_RULES: &str = r#"IF ROLE = "STUDENT":
- TONE: Motivational, encouraging, academic, non-stressful.
- TERMINOLOGY: Use "study sessions", "campus life", "exam prep", "learning focus".
- Focus ONLY on:
  - Study consistency and quality
  - Balancing social/screen time with learning
  - Exam readiness and syllabus coverage
  - Healthy sleep for memory retention
- Do NOT mention workplace terms (deadlines, boss, meetings, KPI)."#;

const PROFESSIONAL_RULES: &str = r#"IF ROLE = "PROFESSIONAL":
- TONE: Professional, efficient, balanced.
- TERMINOLOGY: Use "work blocks", "productivity", "career growth", "work-life balance".
- Focus ONLY on:
  - Work efficiency and output
  - Task prioritization
  - Stress management and burnout prevention
  - Disconnecting from work
- Do NOT mention exams, grades, or study habits."#;

const ANALYSIS_OBJECTIVES: &str = "ANALYSIS OBJECTIVES:
- Identify productivity patterns
- Detect inefficiencies in routine
- Identify early burnout risk (non-medical)
- Encourage sustainable productivity habits";

const OUTPUT_FORMAT: &str = r#"OUTPUT FORMAT (MANDATORY):
Return the response in the following structure:

[Brief Insight]
- One sentence summary tailored strictly to the role.

[Key Observation]
- Highlight one specific data point (e.g., "Great consistency in sleep" or "Study hours dipped yesterday").

[Actionable Recommendations]
- 2-3 practical, role-specific suggestions.
- For STUDENTS: Suggest study techniques (Pomodoro, active recall) or relaxation.
- For PROFESSIONALS: Suggest blocking distractions, breaks, or boundary setting.

[Motivation/Tip]
- A short, positive closing remark."#;

const STYLE_RULES: &str = "STYLE RULES:
- Professional yet warm for students; Efficient for professionals.
- Clear and concise language.
- No emojis.
- No diagnoses or predictions.
- No content unrelated to the given role.";

/// Build the recommendation prompt for `snapshot` and its precomputed `score`.
pub fn compose_prompt(snapshot: &RoutineSnapshot, score: u8) -> String {
    let role = snapshot.role.prompt_label();
    format!(
        r#"SYSTEM CONSTRAINT (IMPORTANT):
The user role will always be provided as a fixed value:
ROLE = "{role}" (value: "STUDENT" or "PROFESSIONAL")
You must follow the rules for the given role and ignore the other role completely.

INPUT DATA (USE ONLY THESE):
- Role: {role}
- Sleep: {sleep} hours
- Study/Work: {study} hours
- Screen time: {screen} hours
- Mood level: {mood}/5
- Productivity score: {score}/100

ROLE-BASED RULES (STRICT):

{STUDENT_RULES}

{PROFESSIONAL_RULES}

{ANALYSIS_OBJECTIVES}

{OUTPUT_FORMAT}

{STYLE_RULES}
"#,
        sleep = snapshot.sleep_hours,
        study = snapshot.study_hours,
        screen = snapshot.screen_time,
        mood = snapshot.mood,
    )
}
