//! Built-in role families, their skill templates, and the title alias table.
//!
//! Skill strings use the phrase grammar understood by
//! [`SkillPattern`](super::phrase::SkillPattern): `"AWS / GCP / Azure"` lists
//! alternatives, `"ETL / ELT pipelines"` expands to both pipeline phrases.

use super::RoleTemplate;

/// Family used when a title cannot be resolved or a template is missing.
pub const GENERIC_FAMILY: &str = "generic_professional";

type TemplateRow = (&'static str, &'static [&'static str], &'static [&'static str], &'static [&'static str]);

/// `(family, must_have, nice_to_have, tools)`.
const TEMPLATES: &[TemplateRow] = &[
    (
        "software_engineer",
        &["data structures", "algorithms", "Python / Java / Go", "REST APIs", "Git", "unit testing", "SQL"],
        &["microservices", "CI/CD", "Docker", "AWS / GCP / Azure", "system design"],
        &["Jira", "GitHub", "VS Code", "Linux"],
    ),
    (
        "full_stack_engineer",
        &["JavaScript / TypeScript", "React / Angular / Vue", "Node.js", "REST APIs", "SQL", "Git", "HTML", "CSS"],
        &["GraphQL", "Docker", "CI/CD", "AWS / GCP / Azure", "NoSQL"],
        &["Webpack", "Postman", "GitHub", "Figma"],
    ),
    (
        "frontend_engineer",
        &["JavaScript / TypeScript", "React / Angular / Vue", "HTML", "CSS", "responsive design", "accessibility"],
        &["Next.js", "state management", "web performance", "design systems", "unit testing"],
        &["Webpack", "Vite", "Storybook", "Figma", "Jest"],
    ),
    (
        "backend_engineer",
        &["Python / Java / Go", "REST APIs", "SQL", "microservices", "distributed systems", "Git"],
        &["Kafka", "Redis", "gRPC", "Docker", "Kubernetes", "caching"],
        &["PostgreSQL", "Postman", "Grafana", "Linux"],
    ),
    (
        "platform_engineer",
        &["Kubernetes", "Terraform", "CI/CD", "AWS / GCP / Azure", "infrastructure as code", "Linux"],
        &["service mesh", "Helm", "observability", "Go / Python", "developer experience"],
        &["ArgoCD", "Prometheus", "Grafana", "Vault"],
    ),
    (
        "site_reliability_engineer",
        &["monitoring", "incident response", "Linux", "Kubernetes", "SLOs", "automation"],
        &["Terraform", "Go / Python", "chaos engineering", "capacity planning", "on-call"],
        &["Prometheus", "Grafana", "PagerDuty", "Datadog"],
    ),
    (
        "devops_engineer",
        &["CI/CD", "Docker", "Kubernetes", "Terraform", "AWS / GCP / Azure", "scripting"],
        &["Ansible", "monitoring", "Bash / Python", "GitOps", "security scanning"],
        &["Jenkins", "GitHub Actions", "ArgoCD", "Prometheus"],
    ),
    (
        "cloud_engineer",
        &["AWS / GCP / Azure", "networking", "infrastructure as code", "IAM", "Linux", "cost optimization"],
        &["Terraform", "Kubernetes", "serverless", "Python", "disaster recovery"],
        &["CloudFormation", "CloudWatch", "Terraform Cloud"],
    ),
    (
        "mobile_engineer",
        &["iOS / Android", "Swift / Kotlin", "mobile UI", "REST APIs", "Git", "app store deployment"],
        &["React Native / Flutter", "offline storage", "push notifications", "unit testing"],
        &["Xcode", "Android Studio", "Firebase", "Fastlane"],
    ),
    (
        "ios_engineer",
        &["Swift", "iOS", "UIKit / SwiftUI", "Xcode", "REST APIs", "Git"],
        &["Combine", "Core Data", "Objective-C", "unit testing", "App Store"],
        &["Xcode", "TestFlight", "Fastlane", "Instruments"],
    ),
    (
        "android_engineer",
        &["Kotlin", "Android", "Jetpack Compose", "REST APIs", "Git", "Gradle"],
        &["Java", "coroutines", "Room", "unit testing", "Google Play"],
        &["Android Studio", "Firebase", "Fastlane"],
    ),
    (
        "data_engineer",
        &["SQL", "Python", "ETL / ELT pipelines", "data modeling", "data warehousing", "Spark"],
        &["Airflow", "Kafka", "dbt", "Snowflake / BigQuery / Redshift", "data quality"],
        &["Airflow", "dbt", "Databricks", "Snowflake"],
    ),
    (
        "data_scientist",
        &["Python / R", "statistics", "machine learning", "SQL", "data visualization", "experimentation"],
        &["deep learning", "A/B testing", "feature engineering", "Spark", "causal inference"],
        &["Jupyter", "pandas", "scikit-learn", "Tableau"],
    ),
    (
        "data_analyst",
        &["SQL", "Excel", "data visualization", "dashboards", "statistics", "reporting"],
        &["Python / R", "Tableau / Power BI / Looker", "A/B testing", "data cleaning"],
        &["Tableau", "Power BI", "Looker", "Excel"],
    ),
    (
        "ml_engineer",
        &["Python", "machine learning", "PyTorch / TensorFlow", "model deployment", "MLOps", "SQL"],
        &["Kubernetes", "feature stores", "model monitoring", "Spark", "distributed training"],
        &["MLflow", "Kubeflow", "SageMaker", "Weights & Biases"],
    ),
    (
        "llm_engineer",
        &["Python", "large language models", "prompt engineering", "RAG", "embeddings", "evaluation"],
        &["fine-tuning", "vector databases", "LangChain", "agents", "guardrails"],
        &["LangChain", "LlamaIndex", "Pinecone", "Hugging Face"],
    ),
    (
        "ai_engineer",
        &["Python", "machine learning", "deep learning", "PyTorch / TensorFlow", "model deployment", "APIs"],
        &["large language models", "computer vision", "NLP", "MLOps", "GPU"],
        &["Hugging Face", "CUDA", "Docker", "Weights & Biases"],
    ),
    (
        "product_manager",
        &["product strategy", "roadmap", "user research", "stakeholder management", "requirements", "metrics"],
        &["A/B testing", "SQL", "agile", "go-to-market", "pricing"],
        &["Jira", "Confluence", "Amplitude", "Figma"],
    ),
    (
        "project_manager",
        &["project planning", "stakeholder management", "risk management", "budget", "scheduling", "agile / waterfall"],
        &["PMP", "resource allocation", "vendor management", "change management"],
        &["Microsoft Project", "Jira", "Asana", "Smartsheet"],
    ),
    (
        "program_manager",
        &["program management", "cross-functional", "stakeholder management", "roadmap", "risk management", "execution"],
        &["OKRs", "budget", "technical background", "agile", "executive communication"],
        &["Jira", "Confluence", "Smartsheet"],
    ),
    (
        "scrum_master",
        &["Scrum", "agile", "sprint planning", "retrospectives", "facilitation", "backlog"],
        &["Kanban", "SAFe", "CSM / PSM", "coaching", "metrics"],
        &["Jira", "Confluence", "Miro"],
    ),
    (
        "solutions_architect",
        &["solution design", "AWS / GCP / Azure", "architecture", "integration", "stakeholder management", "security"],
        &["pre-sales", "microservices", "cost optimization", "migration", "certification"],
        &["Visio", "Lucidchart", "Terraform"],
    ),
    (
        "software_architect",
        &["system design", "architecture", "distributed systems", "microservices", "design patterns", "scalability"],
        &["domain-driven design", "event-driven architecture", "cloud", "security", "mentoring"],
        &["Lucidchart", "C4", "Kafka"],
    ),
    (
        "security_engineer",
        &["security", "threat modeling", "vulnerability management", "network security", "incident response", "IAM"],
        &["penetration testing", "SIEM", "cloud security", "compliance", "cryptography"],
        &["Burp Suite", "Splunk", "Wireshark", "Nessus"],
    ),
    (
        "qa_engineer",
        &["test automation", "test plans", "regression testing", "bug tracking", "API testing", "SQL"],
        &["Selenium / Cypress / Playwright", "performance testing", "CI/CD", "Python / Java"],
        &["Selenium", "Cypress", "Postman", "Jira"],
    ),
    (
        "ux_designer",
        &["user research", "wireframing", "prototyping", "usability testing", "interaction design", "design systems"],
        &["accessibility", "information architecture", "visual design", "HTML / CSS"],
        &["Figma", "Sketch", "Miro", "Adobe XD"],
    ),
    (
        "business_analyst",
        &["requirements gathering", "process mapping", "stakeholder management", "SQL", "documentation", "user stories"],
        &["Excel", "data analysis", "agile", "UML", "Tableau / Power BI"],
        &["Jira", "Confluence", "Visio", "Excel"],
    ),
    (
        "engineering_manager",
        &["people management", "hiring", "mentoring", "roadmap", "stakeholder management", "delivery"],
        &["system design", "agile", "performance reviews", "budget", "technical strategy"],
        &["Jira", "Confluence", "Lattice"],
    ),
    (
        "embedded_engineer",
        &["C / C++", "embedded systems", "microcontrollers", "RTOS", "debugging", "hardware interfaces"],
        &["Linux kernel", "SPI / I2C / UART", "Python", "firmware updates", "low-power design"],
        &["JTAG", "oscilloscope", "Keil", "Yocto"],
    ),
    (
        GENERIC_FAMILY,
        &["communication", "teamwork", "problem solving", "time management", "Microsoft Office", "leadership"],
        &["project management", "customer service", "data analysis", "presentation"],
        &["Excel", "PowerPoint", "Outlook"],
    ),
];

/// Title phrases mapped to families. Earlier entries win, so more specific
/// phrases come first.
const ALIASES: &[(&str, &str)] = &[
    ("site reliability", "site_reliability_engineer"),
    ("sre", "site_reliability_engineer"),
    ("devops", "devops_engineer"),
    ("dev ops", "devops_engineer"),
    ("platform engineer", "platform_engineer"),
    ("infrastructure engineer", "platform_engineer"),
    ("cloud architect", "solutions_architect"),
    ("solutions architect", "solutions_architect"),
    ("solution architect", "solutions_architect"),
    ("software architect", "software_architect"),
    ("enterprise architect", "software_architect"),
    ("cloud engineer", "cloud_engineer"),
    ("full stack", "full_stack_engineer"),
    ("fullstack", "full_stack_engineer"),
    ("front end", "frontend_engineer"),
    ("frontend", "frontend_engineer"),
    ("ui engineer", "frontend_engineer"),
    ("back end", "backend_engineer"),
    ("backend", "backend_engineer"),
    ("ios", "ios_engineer"),
    ("android", "android_engineer"),
    ("mobile", "mobile_engineer"),
    ("machine learning", "ml_engineer"),
    ("ml engineer", "ml_engineer"),
    ("mlops", "ml_engineer"),
    ("llm", "llm_engineer"),
    ("prompt engineer", "llm_engineer"),
    ("generative ai", "llm_engineer"),
    ("ai engineer", "ai_engineer"),
    ("artificial intelligence", "ai_engineer"),
    ("data scientist", "data_scientist"),
    ("data science", "data_scientist"),
    ("analytics engineer", "data_engineer"),
    ("data engineer", "data_engineer"),
    ("etl", "data_engineer"),
    ("data analyst", "data_analyst"),
    ("business intelligence", "data_analyst"),
    ("bi analyst", "data_analyst"),
    ("business analyst", "business_analyst"),
    ("cybersecurity", "security_engineer"),
    ("security", "security_engineer"),
    ("quality assurance", "qa_engineer"),
    ("qa", "qa_engineer"),
    ("sdet", "qa_engineer"),
    ("test engineer", "qa_engineer"),
    ("ux", "ux_designer"),
    ("product designer", "ux_designer"),
    ("interaction designer", "ux_designer"),
    ("scrum master", "scrum_master"),
    ("agile coach", "scrum_master"),
    ("engineering manager", "engineering_manager"),
    ("head of engineering", "engineering_manager"),
    ("product manager", "product_manager"),
    ("product owner", "product_manager"),
    ("program manager", "program_manager"),
    ("project manager", "project_manager"),
    ("embedded", "embedded_engineer"),
    ("firmware", "embedded_engineer"),
    ("software engineer", "software_engineer"),
    ("software developer", "software_engineer"),
    ("swe", "software_engineer"),
    ("developer", "software_engineer"),
    ("programmer", "software_engineer"),
];

/// Built-in template for a family, if one exists.
pub fn template(family: &str) -> Option<RoleTemplate> {
    TEMPLATES
        .iter()
        .find(|(name, ..)| *name == family)
        .map(|(_, must, nice, tools)| RoleTemplate {
            must_have: owned_list(must),
            nice_to_have: owned_list(nice),
            tools: owned_list(tools),
        })
}

/// The `generic_professional` template.
pub fn generic() -> RoleTemplate {
    template(GENERIC_FAMILY).unwrap_or_default()
}

/// Names of every built-in family, in table order.
pub fn families() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|(name, ..)| *name)
}

/// Family for a normalized title, matched on whole words.
pub fn family_for_title(normalized_title: &str) -> Option<&'static str> {
    if normalized_title.is_empty() {
        return None;
    }
    let padded = format!(" {normalized_title} ");
    ALIASES
        .iter()
        .find(|(alias, _)| padded.contains(&format!(" {alias} ")))
        .map(|(_, family)| *family)
}

fn owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
