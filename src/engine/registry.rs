//! Static generation data: category phrase templates, placeholder value
//! pools, idea field option pools, and iteration strategies.
//!
//! The registry is plain configuration. It is built once at startup and
//! passed explicitly to the generation functions so tests can substitute a
//! smaller one.

use std::collections::HashMap;

use crate::types::Category;

pub struct CategoryTemplates {
    pub category: Category,
    /// Phrase skeletons with `{placeholder}` tokens.
    pub templates: &'static [&'static str],
    /// Candidate key features for ideas in this category.
    pub features: &'static [&'static str],
}

pub struct Strategy {
    pub name: &'static str,
    pub description: &'static str,
    /// Example changes this strategy can apply.
    pub examples: &'static [&'static str],
    /// Candidate new features introduced by this strategy.
    pub features: &'static [&'static str],
}

pub struct Registry {
    /// Order matters: the deterministic category choice indexes this list.
    pub categories: Vec<CategoryTemplates>,
    pub variables: HashMap<&'static str, &'static [&'static str]>,
    pub monetization: &'static [&'static str],
    pub audiences: &'static [&'static str],
    pub technical: &'static [&'static str],
    pub strategies: &'static [Strategy],
    /// Rationale sentences with a `{change}` token.
    pub rationales: &'static [&'static str],
}

impl Registry {
    pub fn builtin() -> Self {
        Self {
            categories: builtin_categories(),
            variables: VARIABLES.iter().copied().collect(),
            monetization: MONETIZATION_OPTIONS,
            audiences: AUDIENCE_OPTIONS,
            technical: TECH_OPTIONS,
            strategies: STRATEGIES,
            rationales: RATIONALE_TEMPLATES,
        }
    }
}

fn builtin_categories() -> Vec<CategoryTemplates> {
    vec![
        CategoryTemplates {
            category: Category::DeveloperTools,
            templates: &[
                "A platform that automatically {action} for {audience} by analyzing {data_source}",
                "An AI-powered tool that helps developers {solve_problem} by {method}",
                "A collaborative workspace for {team_type} to {accomplish_task} in real-time",
                "A code intelligence platform that {analyzes} and provides {insights}",
                "An API monitoring service that {tracks} and {optimizes} for better performance",
            ],
            features: &[
                "Intelligent code analysis",
                "Real-time collaboration",
                "CI/CD integration",
                "Custom reporting dashboards",
                "API-first architecture",
            ],
        },
        CategoryTemplates {
            category: Category::SaasProductivity,
            templates: &[
                "An intelligent automation platform for {industry} that {streamlines_process}",
                "A vertical SaaS for {niche_market} professionals to {manage_workflow}",
                "A data analytics dashboard that {aggregates} and {visualizes} for {decision_makers}",
                "A workflow orchestration tool that {coordinates} across {systems}",
                "An AI copilot for {profession} that {assists_with} using {technology}",
            ],
            features: &[
                "Automated workflows",
                "Advanced analytics",
                "Third-party integrations",
                "Role-based access control",
                "Mobile-first design",
            ],
        },
        CategoryTemplates {
            category: Category::NicheMarketplaces,
            templates: &[
                "A marketplace connecting {provider_type} with {consumer_type} for {specific_need}",
                "A B2B platform where {sellers} can {transact} with {buyers} in the {industry} space",
                "A curated network of {specialist_type} offering {premium_service}",
                "A peer-to-peer platform for {asset_type} sharing in {geographic_niche}",
                "An enterprise marketplace for {resource_type} with built-in {value_add}",
            ],
            features: &[
                "Verified user profiles",
                "Escrow payment system",
                "Rating and review system",
                "Advanced search and filters",
                "Transaction dispute resolution",
            ],
        },
        CategoryTemplates {
            category: Category::InfrastructureDevops,
            templates: &[
                "A cloud-native {service_type} that {solves_problem} with {unique_approach}",
                "An observability platform focused on {specific_metric} for {tech_stack}",
                "A deployment automation tool that {simplifies} for {target_audience}",
                "A security scanning service that detects {threat_type} and prevents {risk_type} in {environment}",
                "An infrastructure-as-code solution that {enables} through {innovation}",
            ],
            features: &[
                "Auto-scaling",
                "Multi-cloud support",
                "Built-in monitoring",
                "Zero-downtime deployments",
                "Infrastructure as Code",
            ],
        },
        CategoryTemplates {
            category: Category::AiMachineLearning,
            templates: &[
                "An ML model marketplace for {use_case} with {differentiator}",
                "An AI training platform optimized for {model_type} on {data_type}",
                "A no-code ML tool that lets {users} build {applications} without {expertise}",
                "An AI-powered {domain} assistant that {capability} using {technique}",
                "A synthetic data generation platform for {industry} compliance and {purpose}",
            ],
            features: &[
                "Pre-trained models",
                "Custom training pipelines",
                "Real-time inference",
                "Model versioning",
                "Explainability tools",
            ],
        },
        CategoryTemplates {
            category: Category::FintechBusiness,
            templates: &[
                "A payment infrastructure for {market_segment} with {innovative_feature}",
                "An automated {financial_process} platform for {business_type}",
                "A compliance-as-a-service tool for {regulation} in {industry}",
                "An embedded finance solution that {enables} for {platform_type}",
                "A treasury management system for {company_size} with {ai_capability}",
            ],
            features: &[
                "Bank-level security",
                "Automated reconciliation",
                "Multi-currency support",
                "Compliance reporting",
                "RESTful API access",
            ],
        },
    ]
}

static VARIABLES: &[(&str, &[&str])] = &[
    ("action", &["optimizes performance", "detects vulnerabilities", "refactors legacy code", "generates documentation", "manages dependencies"]),
    ("audience", &["enterprise teams", "open-source maintainers", "startup founders", "scaling companies", "remote teams"]),
    ("data_source", &["GitHub repositories", "production logs", "API traffic", "user behavior patterns", "infrastructure metrics"]),
    ("solve_problem", &["reduce technical debt", "prevent security breaches", "optimize cloud costs", "improve code quality", "accelerate deployments"]),
    ("method", &["ML-powered suggestions", "static analysis", "runtime profiling", "collaborative reviews", "automated testing"]),
    ("team_type", &["distributed engineering", "product", "security", "DevOps", "data science"]),
    ("accomplish_task", &["debug complex systems", "architect scalable solutions", "manage incidents", "plan sprints", "review pull requests"]),
    ("analyzes", &["dependency chains", "performance bottlenecks", "security surfaces", "code complexity", "API contracts"]),
    ("insights", &["actionable recommendations", "cost-saving opportunities", "risk assessments", "optimization strategies", "best practices"]),
    ("tracks", &["SLA compliance", "error rates", "latency patterns", "resource utilization", "API health"]),
    ("optimizes", &["caching strategies", "query performance", "network routing", "resource allocation", "load balancing"]),
    ("threat_type", &["zero-day vulnerabilities", "misconfigurations", "compliance violations", "performance regressions", "anomalous behavior"]),
    ("risk_type", &["data breaches", "service outages", "cost overruns", "regulatory penalties", "security incidents"]),
    ("industry", &["healthcare", "fintech", "logistics", "manufacturing", "real estate"]),
    ("streamlines_process", &["reduces manual work by 80%", "automates compliance reporting", "integrates disparate systems", "eliminates data silos", "accelerates time-to-market"]),
    ("niche_market", &["construction", "legal", "dental", "HVAC", "property management"]),
    ("manage_workflow", &["schedule jobs efficiently", "track project milestones", "manage client relationships", "optimize resource allocation", "automate billing"]),
    ("aggregates", &["multi-source data", "cross-platform metrics", "customer feedback", "market signals", "operational KPIs"]),
    ("visualizes", &["trends and anomalies", "predictive insights", "real-time dashboards", "custom reports", "executive summaries"]),
    ("decision_makers", &["C-suite executives", "product managers", "operations teams", "growth marketers", "investment committees"]),
    ("coordinates", &["microservices", "third-party APIs", "data pipelines", "human approvals", "cross-team processes"]),
    ("systems", &["legacy and modern infrastructure", "cloud and on-premise", "internal and external tools", "automated and manual workflows", "structured and unstructured data"]),
    ("profession", &["sales teams", "customer success", "recruiters", "compliance officers", "financial analysts"]),
    ("assists_with", &["lead qualification", "customer onboarding", "candidate screening", "risk assessment", "financial modeling"]),
    ("technology", &["natural language processing", "predictive analytics", "computer vision", "reinforcement learning", "knowledge graphs"]),
    ("provider_type", &["vetted specialists", "certified professionals", "local experts", "freelance consultants", "verified vendors"]),
    ("consumer_type", &["enterprise buyers", "SMB owners", "project managers", "procurement teams", "individual clients"]),
    ("specific_need", &["emergency services", "specialized expertise", "project-based work", "ongoing maintenance", "strategic consulting"]),
    ("sellers", &["manufacturers", "distributors", "service providers", "software vendors", "equipment suppliers"]),
    ("transact", &["negotiate contracts", "procure materials", "license software", "outsource services", "lease equipment"]),
    ("buyers", &["procurement departments", "operations managers", "IT directors", "facility managers", "supply chain teams"]),
    ("specialist_type", &["domain experts", "fractional executives", "technical architects", "industry consultants", "transformation leaders"]),
    ("premium_service", &["strategic advisory", "hands-on implementation", "custom integrations", "white-glove support", "outcome-based projects"]),
    ("asset_type", &["industrial equipment", "specialized software", "computing resources", "professional expertise", "intellectual property"]),
    ("geographic_niche", &["urban markets", "emerging regions", "enterprise campuses", "remote locations", "cross-border corridors"]),
    ("resource_type", &["cloud compute", "specialized talent", "proprietary data", "licensed content", "managed services"]),
    ("value_add", &["instant provisioning", "usage-based pricing", "compliance certification", "24/7 support", "SLA guarantees"]),
    ("service_type", &["observability platform", "data pipeline", "API gateway", "secret management", "backup solution"]),
    ("solves_problem", &["reduces complexity", "improves reliability", "cuts operational costs", "accelerates development", "enhances security"]),
    ("unique_approach", &["edge computing", "serverless architecture", "zero-trust security", "GitOps workflows", "AI-driven automation"]),
    ("specific_metric", &["business impact", "user experience", "cost efficiency", "security posture", "environmental sustainability"]),
    ("tech_stack", &["Kubernetes clusters", "serverless functions", "microservices", "monolithic applications", "edge networks"]),
    ("simplifies", &["multi-cloud deployments", "blue-green releases", "rollback procedures", "environment provisioning", "configuration management"]),
    ("target_audience", &["platform teams", "DevOps engineers", "SREs", "cloud architects", "security teams"]),
    ("environment", &["cloud workloads", "container images", "CI/CD pipelines", "production systems", "supply chains"]),
    ("enables", &["self-service infrastructure", "policy-as-code", "automated governance", "cost attribution", "disaster recovery"]),
    ("innovation", &["natural language interfaces", "visual programming", "AI-assisted generation", "drift detection", "predictive scaling"]),
    ("use_case", &["fraud detection", "personalization", "forecasting", "recommendation", "anomaly detection"]),
    ("differentiator", &["explainability", "low-latency inference", "domain-specific fine-tuning", "continuous learning", "regulatory compliance"]),
    ("model_type", &["large language models", "computer vision", "time series", "reinforcement learning", "graph neural networks"]),
    ("data_type", &["multimodal data", "streaming data", "sensitive data", "edge data", "synthetic data"]),
    ("users", &["business analysts", "domain experts", "product teams", "researchers", "entrepreneurs"]),
    ("applications", &["predictive models", "intelligent automation", "custom classifiers", "recommendation engines", "chatbots"]),
    ("expertise", &["coding skills", "ML knowledge", "data science degree", "cloud infrastructure", "mathematical background"]),
    ("domain", &["legal research", "medical diagnosis", "code review", "content creation", "design"]),
    ("capability", &["analyzes documents", "generates insights", "provides recommendations", "automates workflows", "answers queries"]),
    ("technique", &["retrieval-augmented generation", "few-shot learning", "fine-tuned models", "multi-agent systems", "knowledge graphs"]),
    ("purpose", &["model training", "testing", "privacy preservation", "bias mitigation", "scenario simulation"]),
    ("market_segment", &["gig economy", "cross-border commerce", "subscription businesses", "enterprise procurement", "creator economy"]),
    ("innovative_feature", &["instant settlement", "embedded banking", "crypto rails", "dynamic routing", "fraud prevention AI"]),
    ("financial_process", &["accounts payable", "revenue recognition", "expense management", "cash flow forecasting", "financial close"]),
    ("business_type", &["mid-market companies", "fast-growing startups", "enterprise subsidiaries", "franchise networks", "holding companies"]),
    ("regulation", &["SOC 2", "GDPR", "HIPAA", "PCI-DSS", "SOX"]),
    ("platform_type", &["marketplaces", "SaaS products", "e-commerce platforms", "vertical software", "B2B networks"]),
    ("company_size", &["venture-backed startups", "mid-market firms", "multinational corporations", "private equity portfolios", "public companies"]),
    ("ai_capability", &["cash position optimization", "automated reconciliation", "fraud detection", "predictive analytics", "risk scoring"]),
];

static MONETIZATION_OPTIONS: &[&str] = &[
    "Subscription-based pricing (Basic/Pro/Enterprise tiers)",
    "Usage-based pricing with free tier",
    "Transaction fees on platform activity",
    "Freemium model with paid advanced features",
    "Enterprise licensing with custom SLAs",
    "Per-seat pricing for team accounts",
];

static AUDIENCE_OPTIONS: &[&str] = &[
    "Enterprise development teams",
    "Fast-growing startups",
    "SMB owners and operators",
    "DevOps and platform engineers",
    "Product and engineering leaders",
    "Industry-specific professionals",
];

static TECH_OPTIONS: &[&str] = &[
    "Cloud-native architecture with microservices and event-driven design",
    "Serverless backend with GraphQL API and React frontend",
    "Kubernetes-based platform with distributed data processing",
    "AI/ML pipeline using modern transformer models and vector databases",
    "Real-time collaboration using WebSockets and CRDTs",
    "Multi-tenant SaaS with PostgreSQL and Redis caching",
];

static STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "Feature Expansion",
        description: "Add a complementary feature set that extends the core value proposition",
        examples: &[
            "AI-powered analytics and insights",
            "Advanced automation capabilities",
            "Mobile and offline support",
            "Enterprise SSO and security features",
            "Marketplace or ecosystem integrations",
            "White-label and reseller options",
            "Advanced reporting and dashboards",
            "Workflow customization engine",
            "API and webhook platform",
            "Real-time collaboration tools",
        ],
        features: &[
            "Advanced AI-powered insights and recommendations",
            "Automated workflow orchestration",
            "Real-time collaboration and team features",
            "Custom reporting and analytics dashboards",
            "Mobile app with offline capabilities",
        ],
    },
    Strategy {
        name: "Market Expansion",
        description: "Identify an adjacent market or use case that could benefit from the product",
        examples: &[
            "Expand from SMB to enterprise segment",
            "Launch vertical-specific version for {industry}",
            "Add international support and localization",
            "Create lighter version for individual users",
            "Partner with larger platforms for distribution",
            "Introduce freemium tier to accelerate adoption",
            "Target different department (from IT to Product)",
            "Expand from web to mobile-native experience",
            "Add cross-industry capabilities",
            "Launch partner program for resellers",
        ],
        features: &[
            "Multi-language and localization support",
            "Industry-specific templates and workflows",
            "Enterprise-grade security and compliance",
            "Self-service onboarding and tutorials",
            "Partner and reseller portal",
        ],
    },
    Strategy {
        name: "Technical Evolution",
        description: "Improve the technical architecture or implementation approach",
        examples: &[
            "Migrate to edge computing for better latency",
            "Add real-time processing and streaming",
            "Implement advanced caching and optimization",
            "Build native mobile apps with offline-first design",
            "Add blockchain for transparency and trust",
            "Integrate vector databases for semantic search",
            "Implement federated learning for privacy",
            "Add GraphQL API alongside REST",
            "Build plugin architecture for extensibility",
            "Introduce infrastructure automation",
        ],
        features: &[
            "Edge computing for reduced latency",
            "Advanced caching and performance optimization",
            "Blockchain-based audit trail",
            "GraphQL API with real-time subscriptions",
            "Plugin architecture for extensibility",
        ],
    },
    Strategy {
        name: "Business Model Innovation",
        description: "Evolve the monetization or go-to-market strategy",
        examples: &[
            "Add usage-based pricing tier",
            "Introduce marketplace transaction fees",
            "Launch premium support packages",
            "Create certification and training programs",
            "Add professional services offering",
            "Implement revenue sharing with partners",
            "Launch managed service tier",
            "Add white-label licensing option",
            "Introduce outcome-based pricing",
            "Create platform fee for third-party apps",
        ],
        features: &[
            "Usage-based pricing model",
            "Professional services and consulting",
            "Premium support with SLA guarantees",
            "White-label and reseller options",
            "Revenue sharing partner program",
        ],
    },
    Strategy {
        name: "User Experience Enhancement",
        description: "Significantly improve the user experience or interface",
        examples: &[
            "Add AI assistant for natural language interactions",
            "Implement smart recommendations and personalization",
            "Create guided onboarding and tutorials",
            "Build visual workflow designer (no-code)",
            "Add customizable templates and presets",
            "Implement predictive suggestions",
            "Create command palette for power users",
            "Add accessibility features (WCAG AAA)",
            "Implement progressive disclosure for complexity",
            "Build interactive data visualizations",
        ],
        features: &[
            "AI assistant with natural language interface",
            "Visual workflow designer (no-code/low-code)",
            "Smart templates and presets",
            "Personalized recommendations engine",
            "Command palette for power users",
        ],
    },
    Strategy {
        name: "Integration & Ecosystem",
        description: "Expand integrations and ecosystem partnerships",
        examples: &[
            "Build native integrations with top 10 platforms",
            "Launch app marketplace for third-party extensions",
            "Add Zapier/Make integration support",
            "Integrate with major cloud providers",
            "Build Slack/Teams/Discord bots",
            "Add calendar and scheduling integrations",
            "Integrate with CRM and marketing tools",
            "Support data warehouse connectors",
            "Add GitHub/GitLab/Bitbucket apps",
            "Create browser extensions",
        ],
        features: &[
            "Native integrations with top platforms",
            "Third-party app marketplace",
            "Zapier and Make.com connectors",
            "Slack and Microsoft Teams bots",
            "Browser extension and bookmarklet",
        ],
    },
    Strategy {
        name: "Data & Intelligence",
        description: "Leverage data and AI to add intelligence layer",
        examples: &[
            "Add predictive analytics and forecasting",
            "Implement anomaly detection and alerting",
            "Build recommendation engine",
            "Add natural language processing for insights",
            "Create automated report generation",
            "Implement intelligent automation triggers",
            "Add benchmarking against industry data",
            "Build custom ML model training",
            "Implement sentiment analysis",
            "Add pattern recognition and insights",
        ],
        features: &[
            "Predictive analytics and forecasting",
            "Automated anomaly detection and alerts",
            "Custom ML model training",
            "Industry benchmarking and insights",
            "Natural language report generation",
        ],
    },
    Strategy {
        name: "Compliance & Security",
        description: "Enhance security, privacy, and compliance features",
        examples: &[
            "Achieve SOC 2 Type II certification",
            "Add GDPR compliance tools and data portability",
            "Implement end-to-end encryption",
            "Add audit logging and compliance reporting",
            "Build advanced permission management",
            "Implement data residency options",
            "Add HIPAA compliance for healthcare",
            "Build zero-knowledge architecture",
            "Implement advanced threat detection",
            "Add SAML and advanced auth options",
        ],
        features: &[
            "SOC 2 Type II certification",
            "End-to-end encryption at rest and in transit",
            "Advanced audit logging and compliance reports",
            "GDPR and CCPA data tools",
            "Role-based access control (RBAC)",
        ],
    },
];

static RATIONALE_TEMPLATES: &[&str] = &[
    "This iteration expands the value proposition by {change}, opening up new revenue opportunities and increasing customer lifetime value.",
    "By {change}, we address a key market need and differentiate from competitors, leading to higher conversion and retention.",
    "This evolution enhances the core offering through {change}, making the product more indispensable to our target users.",
    "Implementing {change} reduces friction in adoption and positions us for scale in the next phase of growth.",
    "This strategic iteration leverages {change} to create a more defensible market position and sustainable competitive advantage.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_is_registered_once() {
        let registry = Registry::builtin();
        assert_eq!(registry.categories.len(), Category::ALL.len());
        for category in Category::ALL {
            let count = registry
                .categories
                .iter()
                .filter(|t| t.category == category)
                .count();
            assert_eq!(count, 1, "{category} registered {count} times");
        }
    }

    #[test]
    fn template_placeholders_all_have_pools() {
        let registry = Registry::builtin();
        let re = regex::Regex::new(r"\{(\w+)\}").unwrap();
        for table in &registry.categories {
            for template in table.templates {
                for cap in re.captures_iter(template) {
                    let name = cap.get(1).unwrap().as_str();
                    assert!(
                        registry.variables.contains_key(name),
                        "placeholder {{{name}}} in {} has no value pool",
                        table.category
                    );
                }
            }
        }
    }

    #[test]
    fn strategy_pools_are_non_empty() {
        let registry = Registry::builtin();
        assert!(!registry.strategies.is_empty());
        for strategy in registry.strategies {
            assert!(!strategy.examples.is_empty(), "{}", strategy.name);
            assert!(!strategy.features.is_empty(), "{}", strategy.name);
        }
        assert!(!registry.rationales.is_empty());
    }
}
