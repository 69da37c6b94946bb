use uuid::Uuid;

use crate::dto::template_dto::{CreateTemplatePayload, UpdateTemplatePayload};
use crate::error::{Error, Result};
use crate::models::template::{QuestionTemplate, TemplateType};
use crate::store::memory::{Keyed, MemoryStore};
use crate::utils::template_validation::validate_template;
use crate::utils::time;

impl Keyed for QuestionTemplate {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Default)]
pub struct TemplateService {
    store: MemoryStore<QuestionTemplate>,
}

impl TemplateService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<QuestionTemplate> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<QuestionTemplate> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| Error::NotFound("Template not found".to_string()))
    }

    /// Compose, validate and insert. Invalid templates never reach the store.
    pub async fn create(&self, payload: CreateTemplatePayload) -> Result<QuestionTemplate> {
        let now = time::now();
        let template = QuestionTemplate {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            template_type: payload.template_type,
            template: payload.template,
            subject: payload.subject,
            difficulty: payload.difficulty,
            category: payload.category,
            tags: payload.tags,
            variables: payload.variables,
            examples: payload.examples,
            description: payload.description,
            is_public: payload.is_public,
            language: payload.language,
            format_instructions: payload.format_instructions,
            validation_rules: payload.validation_rules,
            user_id: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let outcome = validate_template(&template);
        if !outcome.is_valid {
            return Err(Error::TemplateInvalid(outcome.errors));
        }
        Ok(self.store.insert(template).await)
    }

    /// Merge the patch over the stored template, validate the result, then
    /// replace in place.
    pub async fn update(
        &self,
        id: &str,
        payload: UpdateTemplatePayload,
    ) -> Result<QuestionTemplate> {
        let mut template = self.get_by_id(id).await?;

        if let Some(name) = payload.name {
            template.name = name;
        }
        if let Some(template_type) = payload.template_type {
            template.template_type = template_type;
        }
        if let Some(body) = payload.template {
            template.template = body;
        }
        template.subject = payload.subject.or(template.subject);
        template.difficulty = payload.difficulty.or(template.difficulty);
        template.category = payload.category.or(template.category);
        template.tags = payload.tags.or(template.tags);
        template.variables = payload.variables.or(template.variables);
        template.examples = payload.examples.or(template.examples);
        template.description = payload.description.or(template.description);
        template.is_public = payload.is_public.or(template.is_public);
        template.language = payload.language.or(template.language);
        template.format_instructions = payload.format_instructions.or(template.format_instructions);
        template.validation_rules = payload.validation_rules.or(template.validation_rules);
        template.updated_at = Some(time::now());

        let outcome = validate_template(&template);
        if !outcome.is_valid {
            return Err(Error::TemplateInvalid(outcome.errors));
        }
        self.store
            .replace(id, template)
            .await
            .ok_or_else(|| Error::NotFound("Template not found".to_string()))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.store.remove(id).await {
            Ok(())
        } else {
            Err(Error::NotFound("Template not found".to_string()))
        }
    }

    /// Sequential creation; the first invalid entry aborts the rest, keeping
    /// everything created so far.
    pub async fn import(&self, entries: Vec<CreateTemplatePayload>) -> Result<usize> {
        let mut count = 0;
        for entry in entries {
            self.create(entry).await?;
            count += 1;
        }
        Ok(count)
    }

    /// Full list plus the date-stamped attachment name.
    pub async fn export(&self) -> (String, Vec<QuestionTemplate>) {
        let filename = format!("templates_{}.json", time::date_stamp(time::now()));
        (filename, self.store.list().await)
    }

    /// Built-in starter templates, available without creating anything.
    pub fn examples(&self) -> Vec<QuestionTemplate> {
        vec![
            example(
                "example-1",
                "Basic Concept MCQ",
                TemplateType::Mcq,
                "What is [TOPIC] in the context of [FIELD]?\n[OPTIONS]\nCorrect: [ANSWER]",
                "General",
                "easy",
                "Concepts",
                "Basic multiple choice question about a concept",
                &["TOPIC", "FIELD", "OPTIONS", "ANSWER"],
                "Replace [TOPIC] with the main concept, [FIELD] with the subject area, and [OPTIONS] with 4 options A) to D)",
            ),
            example(
                "example-2",
                "Compare and Contrast",
                TemplateType::OpenEnded,
                "Compare and contrast [TOPIC1] and [TOPIC2] in terms of their [ASPECT]. Discuss at least three key differences and similarities.",
                "Analysis",
                "medium",
                "Critical Thinking",
                "Question that requires comparing two related concepts",
                &["TOPIC1", "TOPIC2", "ASPECT"],
                "Replace [TOPIC1] and [TOPIC2] with related concepts, and [ASPECT] with the comparison criteria",
            ),
            example(
                "example-3",
                "Problem-Solving MCQ",
                TemplateType::Mcq,
                "Given [SCENARIO], what would be the most appropriate [ACTION] to [GOAL]?\n[OPTIONS]\nCorrect: [ANSWER]",
                "Problem Solving",
                "hard",
                "Application",
                "Scenario-based multiple choice question",
                &["SCENARIO", "ACTION", "GOAL", "OPTIONS", "ANSWER"],
                "Replace [SCENARIO] with a practical situation, [ACTION] with a type of solution, and [GOAL] with the desired outcome",
            ),
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn example(
    id: &str,
    name: &str,
    template_type: TemplateType,
    template: &str,
    subject: &str,
    difficulty: &str,
    category: &str,
    description: &str,
    variables: &[&str],
    format_instructions: &str,
) -> QuestionTemplate {
    QuestionTemplate {
        id: id.to_string(),
        name: name.to_string(),
        template_type,
        template: template.to_string(),
        subject: Some(subject.to_string()),
        difficulty: Some(difficulty.to_string()),
        category: Some(category.to_string()),
        tags: None,
        variables: Some(variables.iter().map(|v| v.to_string()).collect()),
        examples: None,
        description: Some(description.to_string()),
        is_public: Some(true),
        language: Some("en".to_string()),
        format_instructions: Some(format_instructions.to_string()),
        validation_rules: None,
        user_id: None,
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload(name: &str) -> CreateTemplatePayload {
        CreateTemplatePayload {
            name: name.to_string(),
            template_type: TemplateType::OpenEnded,
            template: "Explain [TOPIC] in your own words.".to_string(),
            subject: None,
            difficulty: None,
            category: None,
            tags: None,
            variables: None,
            examples: None,
            description: None,
            is_public: None,
            language: None,
            format_instructions: None,
            validation_rules: None,
        }
    }

    #[tokio::test]
    async fn create_validates_before_inserting() {
        let service = TemplateService::new();
        let mut payload = valid_payload("Long enough");
        payload.template = "Tell me about [TOPIC].".to_string();
        let created = service.create(payload).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(service.list().await.len(), 1);

        let mut invalid = valid_payload("No placeholder");
        invalid.template = "A body without the placeholder.".to_string();
        let err = service.create(invalid).await.unwrap_err();
        match err {
            Error::TemplateInvalid(errors) => {
                assert!(errors.iter().any(|e| e.contains("[TOPIC]")))
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(service.list().await.len(), 1);
    }

    #[tokio::test]
    async fn update_merges_and_revalidates() {
        let service = TemplateService::new();
        let created = service.create(valid_payload("Original")).await.unwrap();

        let updated = service
            .update(
                &created.id,
                UpdateTemplatePayload {
                    name: Some("Renamed".into()),
                    template_type: None,
                    template: None,
                    subject: Some("Maths".into()),
                    difficulty: None,
                    category: None,
                    tags: None,
                    variables: None,
                    examples: None,
                    description: None,
                    is_public: None,
                    language: None,
                    format_instructions: None,
                    validation_rules: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.subject.as_deref(), Some("Maths"));
        // Body untouched by the patch.
        assert_eq!(updated.template, created.template);
    }

    #[tokio::test]
    async fn import_stops_at_the_first_invalid_entry() {
        let service = TemplateService::new();
        let mut bad = valid_payload("Bad");
        bad.template = "nope".to_string();
        let entries = vec![valid_payload("One"), bad, valid_payload("Three")];
        let err = service.import(entries).await.unwrap_err();
        assert!(matches!(err, Error::TemplateInvalid(_)));
        // The valid entry before the failure was created.
        assert_eq!(service.list().await.len(), 1);
    }

    #[tokio::test]
    async fn export_is_date_stamped() {
        let service = TemplateService::new();
        service.create(valid_payload("One")).await.unwrap();
        let (filename, items) = service.export().await;
        assert!(filename.starts_with("templates_"));
        assert!(filename.ends_with(".json"));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn built_in_examples_are_served_as_is() {
        // Examples bypass validation entirely; several would fail the default
        // [TOPIC] rule by design.
        let examples = TemplateService::new().examples();
        assert_eq!(examples.len(), 3);
        assert!(examples.iter().all(|t| t.id.starts_with("example-")));
    }
}
