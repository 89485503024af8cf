// GraphQL documents sent by the dashboard client

#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

pub const DASHBOARD_QUERY: Operation = Operation {
    name: "Dashboard",
    document: r#"query Dashboard($profile: CareProfileInput!) {
  dailyTips(profile: $profile) {
    __typename
    id
    title
    description
    category
  }
  carePlan(profile: $profile) {
    __typename
    summary
    feedingFocus
    sleepFocus
    playFocus
    developmentFocus
    reminders
  }
}"#,
};

pub const ASK_AGENT_MUTATION: Operation = Operation {
    name: "AskAgent",
    document: r#"mutation AskAgent($input: AskAgentInput!) {
  askAgent(input: $input) {
    __typename
    message
    highlights
  }
}"#,
};
