//! Regex-based content moderation for youth-facing conversations.
//!
//! Every incoming message is screened before any model call. A match in
//! any risk category blocks the request with a redirecting message in the
//! user's language.

use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Language;

/// Outcome of a moderation screen.
#[derive(Debug, Clone)]
pub struct SafetyVerdict {
    pub safe: bool,
    /// Matched risk category slugs.
    pub categories: Vec<&'static str>,
    /// Redirecting message to show when blocked.
    pub message: Option<String>,
}

struct RiskRule {
    category: &'static str,
    pattern: Regex,
}

/// Pattern-based moderation screen.
pub struct SafetyAgent {
    rules: Vec<RiskRule>,
}

impl SafetyAgent {
    pub fn new() -> Result<Self> {
        let sources: [(&'static str, &'static str); 5] = [
            (
                "violence",
                r"(?i)\b(viol[êe]ncia|agress[ãa]o|briga|pancada|machucar|matar|morrer|suic[íi]dio|violence|aggression|fight|hurt|kill|die|suicide)\b",
            ),
            (
                "inappropriate_content",
                r"(?i)\b(sexo|sexual|pornografia|despir|sex|pornography|nude|naked)\b",
            ),
            (
                "illegal_activities",
                r"(?i)\b(drogas|maconha|coca[íi]na|tr[áa]fico|roubo|furto|drugs|marijuana|cocaine|trafficking|theft|steal)\b",
            ),
            (
                "financial_scams",
                r"(?i)\b(esquema|pir[âa]mide|dinheiro f[áa]cil|ganhar muito|sem esfor[çc]o|scheme|pyramid|easy money|get rich|no effort)\b",
            ),
            (
                "personal_info",
                r"(?i)\b(cpf|rg|endere[çc]o|telefone|senha|cart[ãa]o|ssn|address|phone|password|credit card)\b",
            ),
        ];

        let mut rules = Vec::with_capacity(sources.len());
        for (category, source) in sources {
            let pattern = Regex::new(source)
                .map_err(|e| Error::Internal(format!("invalid safety pattern: {e}")))?;
            rules.push(RiskRule { category, pattern });
        }

        Ok(Self { rules })
    }

    /// Screen a user message against all risk categories.
    pub fn check(&self, message: &str, language: Language) -> SafetyVerdict {
        let categories: Vec<&'static str> = self
            .rules
            .iter()
            .filter(|rule| rule.pattern.is_match(message))
            .map(|rule| rule.category)
            .collect();

        if categories.is_empty() {
            return SafetyVerdict {
                safe: true,
                categories,
                message: None,
            };
        }

        debug!(categories = ?categories, "Message blocked by safety screen");
        let message = redirect_message(categories[0], language).to_string();
        SafetyVerdict {
            safe: false,
            categories,
            message: Some(message),
        }
    }

    /// Screen a message, turning a block into an error.
    pub fn enforce(&self, message: &str, language: Language) -> Result<()> {
        let verdict = self.check(message, language);
        if verdict.safe {
            return Ok(());
        }
        Err(Error::ContentBlocked {
            category: verdict.categories[0].to_string(),
            message: verdict.message.unwrap_or_default(),
        })
    }
}

fn redirect_message(category: &str, language: Language) -> &'static str {
    match language {
        Language::PtBr => match category {
            "violence" => {
                "Esta conversa contém conteúdo relacionado à violência. Vamos focar em oportunidades positivas de carreira verde!"
            }
            "inappropriate_content" => {
                "Vamos manter nossa conversa focada em desenvolvimento profissional e carreiras sustentáveis."
            }
            "illegal_activities" => {
                "Não posso ajudar com atividades ilegais. Que tal explorarmos oportunidades legais e positivas no setor verde?"
            }
            "financial_scams" => {
                "Cuidado com esquemas que prometem dinheiro fácil. Vou te ajudar com caminhos reais para construir uma carreira sustentável."
            }
            "personal_info" => {
                "Por segurança, evite compartilhar informações pessoais. Posso te ajudar sem esses dados!"
            }
            _ => "Vamos manter nossa conversa focada em seu desenvolvimento profissional na área verde!",
        },
        Language::En => match category {
            "violence" => {
                "This conversation contains violence-related content. Let's focus on positive green career opportunities!"
            }
            "inappropriate_content" => {
                "Let's keep our conversation focused on professional development and sustainable careers."
            }
            "illegal_activities" => {
                "I can't help with illegal activities. How about we explore legal and positive opportunities in the green sector?"
            }
            "financial_scams" => {
                "Be careful with schemes that promise easy money. I'll help you with real paths to build a sustainable career."
            }
            "personal_info" => {
                "For safety reasons, avoid sharing personal information. I can help you without that data!"
            }
            _ => "Let's keep our conversation focused on your professional development in the green area!",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> SafetyAgent {
        SafetyAgent::new().unwrap()
    }

    #[test]
    fn test_career_question_passes() {
        let verdict = agent().check(
            "Quero trabalhar com energia solar na minha cidade",
            Language::PtBr,
        );
        assert!(verdict.safe);
        assert!(verdict.categories.is_empty());
    }

    #[test]
    fn test_violence_blocked() {
        let verdict = agent().check("como machucar alguém", Language::PtBr);
        assert!(!verdict.safe);
        assert_eq!(verdict.categories, vec!["violence"]);
        assert!(verdict.message.is_some());
    }

    #[test]
    fn test_scam_blocked_in_english() {
        let verdict = agent().check("how to make easy money fast", Language::En);
        assert!(!verdict.safe);
        assert_eq!(verdict.categories, vec!["financial_scams"]);
        assert!(verdict.message.unwrap().contains("easy money"));
    }

    #[test]
    fn test_personal_info_blocked() {
        let verdict = agent().check("meu cpf é 123.456.789-00", Language::PtBr);
        assert!(!verdict.safe);
        assert_eq!(verdict.categories, vec!["personal_info"]);
    }

    #[test]
    fn test_case_insensitive() {
        let verdict = agent().check("onde comprar DROGAS", Language::PtBr);
        assert!(!verdict.safe);
        assert_eq!(verdict.categories, vec!["illegal_activities"]);
    }

    #[test]
    fn test_enforce_returns_blocked_error() {
        let err = agent()
            .enforce("esquema de pirâmide", Language::PtBr)
            .unwrap_err();
        assert!(matches!(err, Error::ContentBlocked { .. }));
    }
}
