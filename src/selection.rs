use crate::models::Repository;

/// Repositories that carry the tracked topic but are not part of the project family.
pub const DEFAULT_EXCLUDED: &[&str] = &[
    "kubeapps",
    "tanzu-framework",
    "package-for-kpack",
    "package-for-cartographer",
    "package-for-kubeapps",
    "package-for-helm-controller",
    "package-for-kustomize-controller",
    "package-for-kpack-dependencies",
    "package-for-source-controller",
    "package-for-application-toolkit",
];

/// Keep repositories tagged with `topic` whose name is not in `excluded`, in input order.
pub fn select_repos<'a>(repos: &'a [Repository], topic: &str, excluded: &[String]) -> Vec<&'a Repository> {
    repos
        .iter()
        .filter(|r| r.has_topic(topic))
        .filter(|r| !excluded.iter().any(|name| *name == r.name))
        .collect()
}
