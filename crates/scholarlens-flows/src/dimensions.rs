//! Built-in dimension schemas
//!
//! Each dimension is a row of data; a single engine drives all of them.

use scholarlens_domain::{Cardinality, Category, ClassificationSchema};

const COMMA_LIST: Cardinality = Cardinality::MultiFromVocabulary { separator: ',' };

const fn cat(token: &'static str, definition: &'static str) -> Category {
    Category { token, definition }
}

/// Educational level of the research subjects
pub const SUBJECT_LEVEL: ClassificationSchema = ClassificationSchema {
    field: "subjectLevel",
    title: "Subject level",
    task: "identify the educational level of the research subjects in the given paper",
    preamble: None,
    cardinality: Cardinality::Single,
    vocabulary: &[
        cat("K12", "subjects who are in or have completed elementary, middle school, or high school."),
        cat("HigherEd", "subjects who are in or have completed any post-secondary study (undergraduate + graduate)."),
        cat("Graduate", "subjects who are in or have completed post-bachelor's study (Master's, PhD, professional programs)."),
        cat("DoctoralPlus", "subjects who have completed postgraduate training, but not a formal degree."),
        cat("Teacher", "subjects who are teachers (use this if the paper only says \"teachers\" without specifying their education level)."),
    ],
    not_reported: "NotApplicable",
    rules: &["Use NotApplicable if the research does not involve human subjects or their educational level is not mentioned."],
};

/// Main discipline of the research subjects
pub const DISCIPLINE: ClassificationSchema = ClassificationSchema {
    field: "discipline",
    title: "Discipline",
    task: "identify the discipline of the research subjects in the given paper",
    preamble: None,
    cardinality: Cardinality::Single,
    vocabulary: &[
        cat("STEM", "science, technology, engineering, mathematics."),
        cat("Medical", "medicine, health, nursing, or healthcare-related fields."),
        cat("Social Science", "humanities, social sciences, law, management, or arts."),
        cat("Multidisciplinary Studies", "interdisciplinary or mixed fields."),
        cat("Others", "does not fit in the above categories."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Fine-grained discipline labels
pub const SUB_DISCIPLINE: ClassificationSchema = ClassificationSchema {
    field: "subDiscipline",
    title: "Sub-discipline",
    task: "identify the sub-discipline of the research subjects in the given paper",
    preamble: Some(
        "Discipline is the main field of study that the research participants belong to \
         (STEM, Medical, Social Science, Multidisciplinary, or other). The sub-discipline is \
         an optional fine label describing that discipline, such as mechanical engineering, \
         law, or nursing.",
    ),
    cardinality: Cardinality::FreeTextMulti { separator: ',' },
    vocabulary: &[],
    not_reported: "NR",
    rules: &[
        "If the research subjects come from several sub-disciplines, separate them with commas.",
        "If there is only one sub-discipline, name it once.",
    ],
};

/// Type of research subjects
pub const PARTICIPANTS_GROUP: ClassificationSchema = ClassificationSchema {
    field: "participantsGroup",
    title: "Participants group",
    task: "identify the participants group of the research subjects in the given paper",
    preamble: Some("The participants group is the type of research subjects in the study."),
    cardinality: Cardinality::Single,
    vocabulary: &[
        cat("Students", "participants are only students."),
        cat("Teacher", "participants are only teachers."),
        cat("Mixed", "participants include both students and teachers, or other combinations."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Total number of participants
pub const SAMPLE_SIZE: ClassificationSchema = ClassificationSchema {
    field: "sampleSize",
    title: "Sample size",
    task: "identify the sample size (N) of the research subjects in the given paper",
    preamble: None,
    cardinality: Cardinality::Numeric,
    vocabulary: &[],
    not_reported: "NR",
    rules: &["Provide only the numeric value representing the total number of participants."],
};

/// Where the participants come from
pub const COUNTRY_OR_REGION: ClassificationSchema = ClassificationSchema {
    field: "countryOrRegion",
    title: "Country or region",
    task: "identify the country or region of the research participants in the given paper",
    preamble: Some(
        "Country or region refers to the country or geographical region where the research \
         participants come from.",
    ),
    cardinality: Cardinality::FreeTextMulti { separator: ';' },
    vocabulary: &[],
    not_reported: "NR",
    rules: &[
        "If one country is reported, write the country name.",
        "If participants come from multiple countries or regions, separate them with semicolons (;).",
    ],
};

/// Research design type
pub const DESIGN_TYPE: ClassificationSchema = ClassificationSchema {
    field: "designType",
    title: "Design type",
    task: "identify the research design type reported in the given paper",
    preamble: None,
    cardinality: Cardinality::Single,
    vocabulary: &[
        cat("Exp", "Experimental study."),
        cat("Quasi", "Quasi-experimental study."),
        cat("PrePost", "Pre-test/Post-test design."),
        cat("CrossSection", "Cross-sectional study."),
        cat("Case", "Case study."),
        cat("Mixed", "Mixed-methods study."),
        cat("Conceptual", "Conceptual or theoretical study."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Strength of evidence
pub const EVIDENCE_STRENGTH: ClassificationSchema = ClassificationSchema {
    field: "evidenceStrength",
    title: "Evidence strength",
    task: "identify the strength of evidence reported in the given paper",
    preamble: None,
    cardinality: Cardinality::Single,
    vocabulary: &[
        cat("A", "Experimental, Quasi-experimental, Pre-post, or Control study designs."),
        cat("B", "Quantitative or Mixed-methods studies."),
        cat("C", "Qualitative or Descriptive studies."),
        cat("D", "Conceptual studies (theoretical, no empirical data)."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// English-as-a-medium-of-instruction context
pub const EMI_CONTEXT: ClassificationSchema = ClassificationSchema {
    field: "emiContext",
    title: "EMI context",
    task: "identify the EMI (English as a Medium of Instruction) context in the given paper",
    preamble: None,
    cardinality: Cardinality::Single,
    vocabulary: &[
        cat("EFL", "English as a Foreign Language context."),
        cat("ESL", "English as a Second Language context."),
        cat("Mixed", "combination of EFL and ESL contexts."),
        cat("Others", "any other course/project modality not covered above."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// How AI use is integrated into the course
pub const INTEGRATION_MODE: ClassificationSchema = ClassificationSchema {
    field: "integrationMode",
    title: "Integration mode",
    task: "identify the mode of AI integration in the given paper",
    preamble: None,
    cardinality: Cardinality::Single,
    vocabulary: &[
        cat("Taught_Required", "AI use is required and directly taught as part of the course."),
        cat("Allowed_Disclosure", "AI use is allowed, and students may disclose it."),
        cat("Semi_Controlled", "AI use is partially controlled or guided by the instructor."),
        cat("Restricted", "AI use is restricted or limited in the learning context."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Whether AI disclosure is required
pub const AI_DISCLOSURE_REQUIRED: ClassificationSchema = ClassificationSchema {
    field: "aiDisclosureRequired",
    title: "AI disclosure required",
    task: "identify whether the paper requires AI disclosure",
    preamble: None,
    cardinality: Cardinality::Single,
    vocabulary: &[
        cat("Yes", "AI disclosure is required."),
        cat("No", "AI disclosure is not required."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Whether AI-use instructions were given to subjects
pub const AI_USE_INSTRUCTIONS_PROVIDED: ClassificationSchema = ClassificationSchema {
    field: "aiUseInstructionsProvided",
    title: "AI use instructions provided",
    task: "identify whether the paper provides explicit instructions or training on AI use to the research subjects",
    preamble: None,
    cardinality: Cardinality::Single,
    vocabulary: &[
        cat("Yes", "Explicit instructions or training on AI use are provided."),
        cat("No", "No explicit instructions or training are provided."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Kinds of AI technology used
pub const AI_TECH_TYPE: ClassificationSchema = ClassificationSchema {
    field: "aiTechType",
    title: "AI technology type",
    task: "identify the type(s) of AI technology used in the given paper",
    preamble: None,
    cardinality: COMMA_LIST,
    vocabulary: &[
        cat("GenAI", "Generative AI tools."),
        cat("MT", "Machine Translation."),
        cat("ASR", "Automatic Speech Recognition."),
        cat("GrammarAid", "Grammar or writing assistance tools."),
        cat("Chatbot", "Chatbot or conversational AI tools."),
        cat("Others", "Any other AI technology not listed above."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Measures or instruments used
pub const MEASURES: ClassificationSchema = ClassificationSchema {
    field: "measures",
    title: "Measures",
    task: "identify the measures or instruments used in the given paper",
    preamble: None,
    cardinality: COMMA_LIST,
    vocabulary: &[
        cat("Test", "standardized or researcher-designed tests."),
        cat("CAF", "corrective/accuracy/fluency metrics."),
        cat("Rubric", "scoring rubrics for performance assessment."),
        cat("Survey", "questionnaires or surveys."),
        cat("Interview", "structured, semi-structured, or unstructured interviews."),
        cat("Log", "system or learning logs."),
        cat("Trace", "trace data, e.g., clickstreams, keystrokes, or digital footprints."),
        cat("Obs", "observations."),
        cat("PolicyDoc", "documents or policies analyzed."),
        cat("Others", "any other measures not covered above."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Outcome categories reported
pub const OUTCOME_CATEGORY: ClassificationSchema = ClassificationSchema {
    field: "outcomeCategory",
    title: "Outcome category",
    task: "identify the outcome category(ies) reported in the given paper",
    preamble: None,
    cardinality: COMMA_LIST,
    vocabulary: &[
        cat("Content", "outcomes related to subject matter knowledge or understanding."),
        cat("Language_Perf", "outcomes related to language performance or proficiency."),
        cat("Engagement", "outcomes related to learner engagement or participation."),
        cat("Affective", "outcomes related to attitudes, motivation, or emotions."),
        cat("Policy_Outputs", "outcomes related to institutional or policy-level results."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Ethical focus of the AI intervention
pub const ETHICS_FOCUS: ClassificationSchema = ClassificationSchema {
    field: "ethicsFocus",
    title: "Ethics focus",
    task: "identify the ethical focus(es) of AI intervention in the given paper",
    preamble: None,
    cardinality: COMMA_LIST,
    vocabulary: &[
        cat("Integrity_Policy", "AI promotes academic or research integrity, following institutional policies."),
        cat("Bias_Fairness", "AI addresses bias, fairness, or equity issues."),
        cat("Disclosure", "AI use is disclosed or transparency is emphasized."),
        cat("Detection_Appeal", "AI is used in detection systems, or subjects can appeal AI decisions."),
        cat("Ethics_Education", "AI supports teaching or learning about ethics."),
        cat("Inclusivity_Multilingual", "AI promotes inclusivity or supports multiple languages."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Roles or benefits of the AI intervention
pub const INTERVENTION_ROLES: ClassificationSchema = ClassificationSchema {
    field: "interventionRoles",
    title: "Intervention roles",
    task: "identify the roles or benefits of AI intervention for the research subjects in the given paper",
    preamble: None,
    cardinality: COMMA_LIST,
    vocabulary: &[
        cat("Knowledge scaffolding", "AI helps provide guidance, explanations, or structure to support learning."),
        cat("Feedback & revision", "AI helps subjects receive feedback and improve or revise their work."),
        cat("Production booster", "AI helps subjects produce work faster or more efficiently."),
        cat("Metacognition/SRL", "AI supports self-reflection, self-regulation, or metacognitive strategies."),
        cat("Policy", "AI is used to guide decisions, rules, or policies affecting subjects."),
        cat("Others", "any other role not covered above."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Teacher support provided or mentioned
pub const TEACHER_SUPPORT: ClassificationSchema = ClassificationSchema {
    field: "teacherSupport",
    title: "Teacher support",
    task: "identify the types of teacher support provided or mentioned in the given paper",
    preamble: None,
    cardinality: COMMA_LIST,
    vocabulary: &[
        cat("Explicit_Scaffolding", "Teachers are given clear guidance or structured support on how to integrate AI."),
        cat("TPD_DigLit", "Teachers receive training or professional development in digital literacy or AI use."),
        cat("Support_Centers", "Teachers have access to support centers, helpdesks, or additional resources."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Language skills targeted or supported by AI
pub const ROLES_SKILLS: ClassificationSchema = ClassificationSchema {
    field: "rolesSkills",
    title: "Language skills",
    task: "identify the language skills targeted or supported by AI in the given paper",
    preamble: None,
    cardinality: COMMA_LIST,
    vocabulary: &[
        cat("L", "Listening."),
        cat("S", "Speaking."),
        cat("R", "Reading."),
        cat("W", "Writing."),
        cat("T", "Translation."),
        cat("Others", "any skill not covered above."),
    ],
    not_reported: "NR",
    rules: &[],
};

/// Every built-in dimension in display order
pub const BUILTIN: &[ClassificationSchema] = &[
    SUBJECT_LEVEL,
    DISCIPLINE,
    SUB_DISCIPLINE,
    PARTICIPANTS_GROUP,
    SAMPLE_SIZE,
    COUNTRY_OR_REGION,
    DESIGN_TYPE,
    EVIDENCE_STRENGTH,
    EMI_CONTEXT,
    INTEGRATION_MODE,
    AI_DISCLOSURE_REQUIRED,
    AI_USE_INSTRUCTIONS_PROVIDED,
    AI_TECH_TYPE,
    MEASURES,
    OUTCOME_CATEGORY,
    ETHICS_FOCUS,
    INTERVENTION_ROLES,
    TEACHER_SUPPORT,
    ROLES_SKILLS,
];
