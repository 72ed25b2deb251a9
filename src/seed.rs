use crate::models::Category::{DataQuality, Features, Performance, Support, UxUi};
use crate::models::Sentiment::{Negative, Neutral, Positive};
use crate::models::{Category, Sentiment, SurveyResponse};

pub const BUNDLED_SOURCE: &str = "bundled survey";

const SEED_RESPONSES: &[(&str, &str, Category, Sentiment)] = &[
    ("alice", "The reporting tool is intuitive and saves me a lot of time.", UxUi, Positive),
    ("bob", "I find it confusing and often buggy, especially when generating charts.", Performance, Negative),
    ("carla", "It's okay for basic reports but lacks advanced customization features.", Features, Neutral),
    ("daniel", "Absolutely love the automation features—it's a game changer!", Features, Positive),
    ("emma", "The interface feels outdated and clunky. Needs a redesign.", UxUi, Negative),
    ("farid", "It works well for my needs, but I wish it had better export options.", Features, Positive),
    ("grace", "I've had frequent issues with data syncing. Support was slow to respond.", DataQuality, Negative),
    ("hugo", "Very efficient and easy to use. I recommend it to my team.", UxUi, Positive),
    ("isla", "Not user-friendly. Took me hours to figure out how to build a report.", UxUi, Negative),
    ("james", "Reliable and fast. Handles large datasets without crashing.", Performance, Positive),
    ("karen", "The dashboard visuals are clean and informative.", UxUi, Positive),
    ("liam", "I wish it had more integrations with third-party tools.", Features, Neutral),
    ("maya", "It's a solid tool, but the learning curve is steep.", UxUi, Positive),
    ("nina", "I love the scheduling feature—it keeps my reports timely.", Features, Positive),
    ("oliver", "Sometimes the filters don't work as expected. Frustrating!", Features, Negative),
    ("paula", "The export to Excel feature is a lifesaver.", Features, Positive),
    ("quentin", "I've had trouble with permissions and sharing reports with my team.", DataQuality, Negative),
    ("rachel", "The tool is powerful but not very beginner-friendly.", UxUi, Neutral),
    ("sam", "Great for tracking KPIs. I use it daily.", Features, Positive),
    ("tina", "The mobile version is buggy and crashes often.", Performance, Negative),
    ("umar", "I appreciate the customization options—it fits our workflow well.", Features, Positive),
    ("victor", "The UI is slick and modern. Very pleasant to use.", UxUi, Positive),
    ("wendy", "I don't like how long it takes to load large reports.", Performance, Negative),
    ("xander", "The support team was helpful when I had issues.", Support, Positive),
    ("yasmin", "It's decent, but I prefer other tools for visualization.", Features, Neutral),
    ("zane", "The templates are useful and save setup time.", Features, Positive),
    ("abby", "I had to watch several tutorials before I could use it effectively.", UxUi, Negative),
    ("bruno", "The real-time data updates are impressive.", Performance, Positive),
    ("cindy", "It's too complex for casual users.", UxUi, Negative),
    ("derek", "I like the alerts feature—it keeps me informed.", Features, Positive),
    ("ella", "The tool feels unfinished. Lots of small bugs.", Performance, Negative),
    ("finn", "It's fast and responsive. No complaints so far.", Performance, Positive),
    ("gia", "I wish it had dark mode.", UxUi, Neutral),
    ("harry", "The report builder is flexible and powerful.", Features, Positive),
    ("irene", "I don't trust the data accuracy sometimes.", DataQuality, Negative),
    ("jack", "The onboarding process was smooth and helpful.", Support, Positive),
    ("kylie", "I use it for client reports—it's professional and clean.", UxUi, Positive),
    ("leo", "The drag-and-drop interface is intuitive.", UxUi, Positive),
    ("mia", "I've had issues with login and authentication.", DataQuality, Negative),
    ("noah", "The analytics are deep and insightful.", Features, Positive),
    ("opal", "It's good, but the pricing is a bit high.", Performance, Positive),
    ("peter", "The tool helped us streamline our reporting process.", Performance, Positive),
    ("quincy", "I dislike the font choices and layout.", UxUi, Negative),
    ("rose", "The documentation is thorough and easy to follow.", Support, Positive),
    ("steve", "I had a great experience with the trial version.", Support, Positive),
    ("tara", "The tool doesn't support my preferred file format.", Features, Negative),
    ("ursula", "I love the ability to schedule recurring reports.", Features, Positive),
    ("vince", "The charts are beautiful and customizable.", Features, Positive),
    ("wanda", "It's okay, but I miss some features from our old tool.", Features, Neutral),
    ("xenia", "The tool is very responsive and rarely lags.", Performance, Positive),
    ("yuri", "I had to contact support multiple times for basic issues.", Support, Negative),
    ("zoe", "It's my go-to tool for monthly reporting.", Performance, Positive),
];

pub struct CategoryInsights {
    pub criteria: &'static str,
    pub observations: &'static [&'static str],
    pub actionable_insights: &'static [&'static str],
}

/// The dataset the dashboard starts with before any upload.
pub fn bundled_responses() -> Vec<SurveyResponse> {
    SEED_RESPONSES
        .iter()
        .map(|(user_name, answer, category, sentiment)| {
            SurveyResponse::new(user_name, answer, *category, *sentiment)
        })
        .collect()
}

pub fn category_insights(category: Category) -> CategoryInsights {
    match category {
        Category::UxUi => CategoryInsights {
            criteria: "Comments about interface design, layout, usability and the learning curve.",
            observations: &[
                "Mixed feedback on interface design: users appreciate clean visuals but find complexity challenging",
                "Strong positive sentiment for intuitive features like the drag-and-drop interface",
                "Learning curve is a common concern, especially for casual users",
                "Professional appearance is highly valued for client-facing reports",
            ],
            actionable_insights: &[
                "Develop a simplified beginner mode to reduce complexity for new users",
                "Create interactive onboarding tutorials to address the steep learning curve",
                "Add a dark mode option as specifically requested by users",
                "Maintain the professional, clean aesthetic while improving usability",
            ],
        },
        Category::Performance => CategoryInsights {
            criteria: "Comments about speed, load times, stability and crashes.",
            observations: &[
                "Strong performance with large datasets and real-time updates",
                "Mobile version has significant stability issues with frequent crashes",
                "Report loading times are a concern for users with large reports",
                "Desktop performance is generally reliable and fast",
            ],
            actionable_insights: &[
                "Prioritize mobile app stability fixes and crash prevention",
                "Implement progressive loading for large reports to improve perceived speed",
                "Optimize chart generation performance to reduce bugs during creation",
                "Consider caching for frequently accessed large datasets",
            ],
        },
        Category::Features => CategoryInsights {
            criteria: "Comments about functionality, automation, integrations, customization options.",
            observations: &[
                "Users love automation, scheduling, and customizable features.",
                "Some features are missing or limited, like advanced customization, filters, and integrations.",
            ],
            actionable_insights: &[
                "Improve advanced customization and filtering.",
                "Add more export options.",
            ],
        },
        Category::Support => CategoryInsights {
            criteria: "Comments about the support team, documentation, onboarding and trials.",
            observations: &[
                "Support quality is good when users can reach the team",
                "Documentation is comprehensive and well-structured",
                "Response time issues with some users needing multiple contacts",
                "Onboarding process receives positive feedback",
            ],
            actionable_insights: &[
                "Improve support response times and ticket management",
                "Implement a chatbot or FAQ system for common issues",
            ],
        },
        Category::DataQuality => CategoryInsights {
            criteria: "Comments about data accuracy, sync issues, permissions, authentication.",
            observations: &[
                "Data syncing issues cause user frustration and trust concerns",
                "Authentication and login problems affect user experience",
                "Permission and sharing functionality needs improvement",
                "Some users question data accuracy, impacting confidence",
            ],
            actionable_insights: &[
                "Investigate and fix data synchronization issues as top priority",
                "Improve authentication system reliability and user experience",
                "Simplify permission management and team sharing features",
                "Implement data validation indicators to build user trust",
            ],
        },
    }
}
