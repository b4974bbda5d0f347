use crate::core::config::DEFAULT_CONTAINER_CLASSES;
use crate::parser::{JobRecord, Parser};
use crate::{ScraperError, ScraperResult};
use log::{debug, info, trace};
use scraper::{ElementRef, Html, Selector};

const DEFAULT_COMPANY_SELECTORS: [&str; 2] = ["h3", "div.company"];
const DEFAULT_SKILLS_SELECTORS: [&str; 2] = ["span.skills", "div.job-skills"];
const LINK_SELECTOR: &str = "a[href]";

/// Extracts job records from a listing page.
///
/// Container classes are tried in priority order and the first class with at
/// least one element on the page wins; lower-priority classes are ignored even
/// if they also match. Inside each container every field walks its own
/// selector chain and takes the first hit, falling back to a sentinel.
pub struct JobParser {
    containers: Vec<(String, Selector)>,
    company: Vec<Selector>,
    skills: Vec<Selector>,
    link: Selector,
}

impl JobParser {
    pub fn new() -> ScraperResult<Self> {
        Ok(Self {
            containers: compile_classes(DEFAULT_CONTAINER_CLASSES)?,
            company: compile_all(DEFAULT_COMPANY_SELECTORS)?,
            skills: compile_all(DEFAULT_SKILLS_SELECTORS)?,
            link: compile(LINK_SELECTOR)?,
        })
    }

    pub fn with_container_classes<I, S>(mut self, classes: I) -> ScraperResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.containers = compile_classes(classes)?;
        Ok(self)
    }

    pub fn with_company_selectors<I, S>(mut self, selectors: I) -> ScraperResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.company = compile_all(selectors)?;
        Ok(self)
    }

    pub fn with_skills_selectors<I, S>(mut self, selectors: I) -> ScraperResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills = compile_all(selectors)?;
        Ok(self)
    }

    pub fn container_classes(&self) -> impl Iterator<Item = &str> {
        self.containers.iter().map(|(class, _)| class.as_str())
    }

    fn parse_container(&self, container: ElementRef) -> JobRecord {
        let company = first_text(container, &self.company);
        let skills = first_text(container, &self.skills);
        let link = container
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);

        JobRecord::from_parts(company, skills, link)
    }
}

impl Parser for JobParser {
    fn parse(&self, html: &str) -> ScraperResult<Vec<JobRecord>> {
        let document = Html::parse_document(html);
        trace!("Parsing HTML content: {}", html);

        let (class, containers) = self
            .containers
            .iter()
            .find_map(|(class, selector)| {
                let found: Vec<ElementRef> = document.select(selector).collect();
                debug!("Container class `{}` matched {} elements", class, found.len());
                (!found.is_empty()).then_some((class, found))
            })
            .ok_or(ScraperError::NoMatch)?;

        info!(
            "Extracting {} job containers using class `{}`",
            containers.len(),
            class
        );

        Ok(containers
            .into_iter()
            .map(|container| self.parse_container(container))
            .collect())
    }
}

fn first_text(container: ElementRef, chain: &[Selector]) -> Option<String> {
    chain
        .iter()
        .find_map(|selector| container.select(selector).next())
        .map(|element| element.text().collect::<String>().trim().to_string())
}

fn compile(selector: &str) -> ScraperResult<Selector> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn compile_all<I, S>(selectors: I) -> ScraperResult<Vec<Selector>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    selectors.into_iter().map(|s| compile(s.as_ref())).collect()
}

fn compile_classes<I, S>(classes: I) -> ScraperResult<Vec<(String, Selector)>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let compiled = classes
        .into_iter()
        .map(|class| {
            let class = class.as_ref().trim();
            if class.is_empty() || class.contains(char::is_whitespace) {
                return Err(ScraperError::InvalidSelector {
                    selector: class.to_string(),
                    reason: "expected a single CSS class name".to_string(),
                });
            }
            Ok((class.to_string(), compile(&format!(".{}", class))?))
        })
        .collect::<ScraperResult<Vec<_>>>()?;

    if compiled.is_empty() {
        return Err(ScraperError::InvalidSelector {
            selector: String::new(),
            reason: "at least one container class is required".to_string(),
        });
    }
    Ok(compiled)
}
