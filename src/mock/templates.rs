//! Hand-written story map templates

use crate::prompt::INFRASTRUCTURE_EPIC;
use crate::types::{GeneratedEpic, GeneratedFeature, GeneratedStoryMap, GeneratedTask, Priority};

fn epic(title: &str, description: &str, features: Vec<GeneratedFeature>) -> GeneratedEpic {
    GeneratedEpic {
        title: title.to_string(),
        description: description.to_string(),
        features,
    }
}

fn feature(title: &str, description: &str, tasks: Vec<GeneratedTask>) -> GeneratedFeature {
    GeneratedFeature {
        title: title.to_string(),
        description: description.to_string(),
        tasks,
    }
}

fn task(
    title: &str,
    description: &str,
    priority: Priority,
    effort: &str,
    acceptance_criteria: &[&str],
) -> GeneratedTask {
    GeneratedTask {
        title: title.to_string(),
        description: description.to_string(),
        priority,
        effort: effort.to_string(),
        acceptance_criteria: acceptance_criteria.iter().map(|c| (*c).to_string()).collect(),
    }
}

/// Enabling work shared by every template, plus one product-specific story
/// for each of the two core features
fn infrastructure_epic(security_extra: GeneratedTask, data_extra: GeneratedTask) -> GeneratedEpic {
    epic(
        INFRASTRUCTURE_EPIC,
        "Enabling stories and non-functional requirements the product depends on",
        vec![
            feature(
                "Security & Performance",
                "Protect users and keep the product fast under load",
                vec![
                    task(
                        "Set up TLS for all traffic",
                        "As a developer, I need every connection encrypted so that user data cannot be intercepted",
                        Priority::High,
                        "1 day",
                        &[
                            "All endpoints are served over HTTPS only",
                            "HTTP requests redirect to HTTPS",
                            "Certificates renew automatically",
                        ],
                    ),
                    task(
                        "Add API rate limiting",
                        "As a developer, I need request limits per client so that abuse cannot degrade the service",
                        Priority::High,
                        "2 days",
                        &[
                            "Clients exceeding the limit receive HTTP 429",
                            "Limits are configurable per endpoint",
                            "Rate limit events are logged",
                        ],
                    ),
                    task(
                        "Implement authentication and authorization",
                        "As a developer, I need secure sign-in and role checks so that users only reach their own data",
                        Priority::High,
                        "4 days",
                        &[
                            "Passwords are hashed with a slow hash function",
                            "Sessions expire after inactivity",
                            "Protected routes reject unauthenticated requests",
                        ],
                    ),
                    task(
                        "Centralize logging and monitoring",
                        "As an operator, I need structured logs, metrics and alerts so that incidents are found and diagnosed quickly",
                        Priority::Medium,
                        "3 days",
                        &[
                            "Logs from all services are searchable in one place",
                            "Error rate and latency dashboards exist",
                            "On-call is alerted when error rate exceeds the threshold",
                        ],
                    ),
                    security_extra,
                ],
            ),
            feature(
                "Data Management",
                "Store data reliably and serve it quickly as usage grows",
                vec![
                    task(
                        "Design scalable database schema",
                        "As a developer, I need a normalized, indexed schema so that queries stay fast as data grows",
                        Priority::High,
                        "3 days",
                        &[
                            "Schema changes are applied through versioned migrations",
                            "Frequent queries are covered by indexes",
                            "Schema supports horizontal read replicas",
                        ],
                    ),
                    task(
                        "Introduce caching layer",
                        "As a developer, I need frequently read data cached so that response times stay low",
                        Priority::Medium,
                        "2 days",
                        &[
                            "Hot read paths are served from cache",
                            "Cache entries are invalidated on write",
                            "Cache hit ratio is reported as a metric",
                        ],
                    ),
                    task(
                        "Automate backups and recovery",
                        "As an operator, I need scheduled backups with tested restores so that data loss is recoverable",
                        Priority::Medium,
                        "2 days",
                        &[
                            "Backups run daily and are retained for 30 days",
                            "A restore is rehearsed at least monthly",
                        ],
                    ),
                    data_extra,
                ],
            ),
        ],
    )
}

pub(super) fn ecommerce() -> GeneratedStoryMap {
    GeneratedStoryMap {
        title: "E-commerce Platform".to_string(),
        description: "An online store where customers browse products, manage a cart and check out securely".to_string(),
        epics: vec![
            epic(
                "Product Discovery",
                "Help customers find the products they want",
                vec![
                    feature(
                        "Product Catalog",
                        "Browse products by category",
                        vec![
                            task(
                                "Browse products by category",
                                "As a shopper, I want to browse categories so that I can explore the range",
                                Priority::High,
                                "3 days",
                                &[
                                    "Categories list shows product counts",
                                    "Product grid paginates after 24 items",
                                    "Out-of-stock products are labeled",
                                ],
                            ),
                            task(
                                "View product details",
                                "As a shopper, I want a detail page with photos, price and stock so that I can decide to buy",
                                Priority::High,
                                "2 days",
                                &[
                                    "Page shows images, description, price and availability",
                                    "Variant selection updates price and stock",
                                ],
                            ),
                        ],
                    ),
                    feature(
                        "Search & Filters",
                        "Find products quickly",
                        vec![
                            task(
                                "Search products by keyword",
                                "As a shopper, I want to search by keyword so that I can find a specific item",
                                Priority::High,
                                "3 days",
                                &[
                                    "Results match title and description",
                                    "Search tolerates minor typos",
                                    "Empty results suggest alternatives",
                                ],
                            ),
                            task(
                                "Filter by price and rating",
                                "As a shopper, I want to filter results so that I only see relevant products",
                                Priority::Medium,
                                "2 days",
                                &[
                                    "Price range filter narrows results",
                                    "Rating filter hides lower-rated products",
                                ],
                            ),
                        ],
                    ),
                ],
            ),
            epic(
                "Shopping Cart & Checkout",
                "Let customers purchase products",
                vec![
                    feature(
                        "Shopping Cart",
                        "Collect products before purchase",
                        vec![
                            task(
                                "Add products to cart",
                                "As a shopper, I want to add items to a cart so that I can buy several at once",
                                Priority::High,
                                "2 days",
                                &[
                                    "Cart count updates immediately",
                                    "Cart persists across sessions for signed-in users",
                                ],
                            ),
                            task(
                                "Update cart quantities",
                                "As a shopper, I want to change quantities or remove items so that the cart matches my intent",
                                Priority::Medium,
                                "1 day",
                                &[
                                    "Quantity changes recalculate totals",
                                    "Removing the last item shows an empty cart state",
                                ],
                            ),
                        ],
                    ),
                    feature(
                        "Checkout",
                        "Pay for an order",
                        vec![
                            task(
                                "Enter shipping details",
                                "As a shopper, I want to enter and save a shipping address so that future orders are faster",
                                Priority::High,
                                "2 days",
                                &[
                                    "Address fields are validated",
                                    "Saved addresses can be selected",
                                ],
                            ),
                            task(
                                "Pay by card",
                                "As a shopper, I want to pay by card so that I can complete my order",
                                Priority::High,
                                "4 days",
                                &[
                                    "Payment is processed through the payment provider",
                                    "Declined payments show a clear error",
                                    "Successful payment shows an order confirmation",
                                ],
                            ),
                        ],
                    ),
                ],
            ),
            epic(
                "Order Management",
                "Keep customers informed after purchase",
                vec![feature(
                    "Order Tracking",
                    "Follow orders through delivery",
                    vec![
                        task(
                            "View order history",
                            "As a customer, I want to see past orders so that I can reorder or check details",
                            Priority::Medium,
                            "2 days",
                            &[
                                "Orders are listed newest first",
                                "Each order shows items, total and status",
                            ],
                        ),
                        task(
                            "Receive shipping notifications",
                            "As a customer, I want email updates when my order ships so that I know when to expect it",
                            Priority::Low,
                            "2 days",
                            &[
                                "Email is sent when status changes to shipped",
                                "Email contains a tracking link",
                            ],
                        ),
                    ],
                )],
            ),
            infrastructure_epic(
                task(
                    "Secure payment data handling",
                    "As a developer, I need card data kept out of our systems so that we meet PCI DSS requirements",
                    Priority::High,
                    "3 days",
                    &[
                        "Card details are tokenized by the payment provider",
                        "No card numbers appear in logs or databases",
                    ],
                ),
                task(
                    "Keep inventory counts consistent",
                    "As a developer, I need stock updates applied transactionally so that items are never oversold",
                    Priority::High,
                    "3 days",
                    &[
                        "Concurrent purchases of the last item allow only one order",
                        "Stock is restored when an order is cancelled",
                    ],
                ),
            ),
        ],
    }
}

pub(super) fn social_network() -> GeneratedStoryMap {
    GeneratedStoryMap {
        title: "Social Network Platform".to_string(),
        description: "A community where people create profiles, share posts and connect with each other".to_string(),
        epics: vec![
            epic(
                "User Profiles",
                "Let people present themselves",
                vec![feature(
                    "Profile Management",
                    "Create and edit a public profile",
                    vec![
                        task(
                            "Create a profile",
                            "As a new member, I want to set a name, photo and bio so that others recognize me",
                            Priority::High,
                            "2 days",
                            &[
                                "Photo upload accepts JPEG and PNG up to 5 MB",
                                "Bio is limited to 160 characters",
                            ],
                        ),
                        task(
                            "Control profile privacy",
                            "As a member, I want to choose who sees my profile so that I control my information",
                            Priority::Medium,
                            "2 days",
                            &[
                                "Profile can be public or friends-only",
                                "Private fields are hidden from non-friends",
                            ],
                        ),
                    ],
                )],
            ),
            epic(
                "Content Sharing",
                "Let people post and react to content",
                vec![
                    feature(
                        "Posts",
                        "Publish text and images",
                        vec![
                            task(
                                "Publish a post",
                                "As a member, I want to post text and images so that I can share updates",
                                Priority::High,
                                "3 days",
                                &[
                                    "Posts support text and up to 4 images",
                                    "New posts appear at the top of my profile",
                                ],
                            ),
                            task(
                                "Like and comment on posts",
                                "As a member, I want to react to posts so that I can engage with friends",
                                Priority::High,
                                "3 days",
                                &[
                                    "Like count updates without a page reload",
                                    "Comments are shown oldest first",
                                ],
                            ),
                        ],
                    ),
                    feature(
                        "News Feed",
                        "See what connections are sharing",
                        vec![task(
                            "View a personalized feed",
                            "As a member, I want a feed of posts from my connections so that I stay up to date",
                            Priority::High,
                            "4 days",
                            &[
                                "Feed shows posts from followed members",
                                "Feed loads more posts on scroll",
                                "Posts from blocked members never appear",
                            ],
                        )],
                    ),
                ],
            ),
            epic(
                "Connections",
                "Let people build their network",
                vec![feature(
                    "Friends & Followers",
                    "Connect with other members",
                    vec![
                        task(
                            "Send and accept friend requests",
                            "As a member, I want to connect with people I know so that we can see each other's posts",
                            Priority::High,
                            "2 days",
                            &[
                                "Recipient is notified of a new request",
                                "Accepted requests appear in both friend lists",
                            ],
                        ),
                        task(
                            "Block a member",
                            "As a member, I want to block someone so that they can no longer contact me",
                            Priority::Medium,
                            "1 day",
                            &[
                                "Blocked members cannot view my profile or message me",
                            ],
                        ),
                    ],
                )],
            ),
            infrastructure_epic(
                task(
                    "Add content moderation pipeline",
                    "As a developer, I need reported content queued for review so that abusive posts are removed quickly",
                    Priority::High,
                    "4 days",
                    &[
                        "Members can report a post or comment",
                        "Reported items appear in a moderation queue",
                        "Removed content is hidden for all members",
                    ],
                ),
                task(
                    "Store media in object storage",
                    "As a developer, I need uploaded images stored outside the database and served via CDN so that media scales cheaply",
                    Priority::Medium,
                    "2 days",
                    &[
                        "Uploads are written to object storage",
                        "Images are served through a CDN with resized variants",
                    ],
                ),
            ),
        ],
    }
}

pub(super) fn task_management() -> GeneratedStoryMap {
    GeneratedStoryMap {
        title: "Task Management App".to_string(),
        description: "An application for creating, organizing and tracking tasks alone or in a team".to_string(),
        epics: vec![
            epic(
                "Task Basics",
                "Capture and complete work",
                vec![
                    feature(
                        "Task Creation",
                        "Add tasks quickly",
                        vec![
                            task(
                                "Create a task",
                                "As a user, I want to add a task with a title and due date so that I don't forget it",
                                Priority::High,
                                "1 day",
                                &[
                                    "Title is required",
                                    "Due date is optional and defaults to none",
                                ],
                            ),
                            task(
                                "Edit and delete tasks",
                                "As a user, I want to change or remove tasks so that my list stays accurate",
                                Priority::High,
                                "1 day",
                                &[
                                    "Edits are saved immediately",
                                    "Deleting asks for confirmation",
                                ],
                            ),
                        ],
                    ),
                    feature(
                        "Task Completion",
                        "Track progress",
                        vec![task(
                            "Mark tasks as done",
                            "As a user, I want to check off tasks so that I can see my progress",
                            Priority::High,
                            "1 day",
                            &[
                                "Completed tasks move to a done section",
                                "Completion can be undone",
                            ],
                        )],
                    ),
                ],
            ),
            epic(
                "Organization",
                "Keep many tasks manageable",
                vec![feature(
                    "Lists & Labels",
                    "Group and find tasks",
                    vec![
                        task(
                            "Organize tasks into lists",
                            "As a user, I want separate lists so that I can keep projects apart",
                            Priority::Medium,
                            "2 days",
                            &[
                                "Tasks can be moved between lists",
                                "Each list shows its open task count",
                            ],
                        ),
                        task(
                            "Filter tasks by label and due date",
                            "As a user, I want to filter tasks so that I can focus on what matters today",
                            Priority::Medium,
                            "2 days",
                            &[
                                "Filter by one or more labels",
                                "Overdue tasks are highlighted",
                            ],
                        ),
                    ],
                )],
            ),
            epic(
                "Collaboration",
                "Share work with a team",
                vec![feature(
                    "Shared Lists",
                    "Work on tasks together",
                    vec![
                        task(
                            "Share a list with teammates",
                            "As a team lead, I want to share a list so that the team works from one plan",
                            Priority::Medium,
                            "3 days",
                            &[
                                "Invitees receive an email invitation",
                                "Shared lists show members' avatars",
                            ],
                        ),
                        task(
                            "Assign tasks",
                            "As a team lead, I want to assign tasks so that ownership is clear",
                            Priority::Medium,
                            "2 days",
                            &[
                                "Assignee is notified",
                                "Tasks can be filtered by assignee",
                            ],
                        ),
                    ],
                )],
            ),
            infrastructure_epic(
                task(
                    "Enforce list-level access control",
                    "As a developer, I need permission checks on every list so that shared data is only visible to members",
                    Priority::High,
                    "2 days",
                    &[
                        "Non-members receive HTTP 403 for shared lists",
                        "Removed members lose access immediately",
                    ],
                ),
                task(
                    "Sync tasks across devices",
                    "As a developer, I need changes synchronized with conflict resolution so that every device shows the same tasks",
                    Priority::Medium,
                    "4 days",
                    &[
                        "Offline edits sync when the device reconnects",
                        "Conflicting edits keep the latest change",
                    ],
                ),
            ),
        ],
    }
}

pub(super) fn generic(product_description: &str) -> GeneratedStoryMap {
    GeneratedStoryMap {
        title: "Product Story Map".to_string(),
        description: product_description.to_string(),
        epics: vec![
            epic(
                "User Onboarding",
                "Get new users to their first success",
                vec![feature(
                    "Account Setup",
                    "Register and sign in",
                    vec![
                        task(
                            "Sign up with email",
                            "As a new user, I want to create an account so that my data is saved",
                            Priority::High,
                            "2 days",
                            &[
                                "Email address is verified",
                                "Duplicate emails are rejected",
                            ],
                        ),
                        task(
                            "Complete a guided introduction",
                            "As a new user, I want a short walkthrough so that I understand the main features",
                            Priority::Medium,
                            "2 days",
                            &[
                                "Walkthrough can be skipped",
                                "Walkthrough is shown only once",
                            ],
                        ),
                    ],
                )],
            ),
            epic(
                "Core Functionality",
                "Deliver the main value of the product",
                vec![
                    feature(
                        "Primary Workflow",
                        "The main job users come to do",
                        vec![
                            task(
                                "Create a core item",
                                "As a user, I want to create the product's main item so that I can start getting value",
                                Priority::High,
                                "3 days",
                                &[
                                    "Required fields are validated",
                                    "New items appear immediately in the list",
                                ],
                            ),
                            task(
                                "Edit and delete items",
                                "As a user, I want to manage my items so that they stay current",
                                Priority::High,
                                "2 days",
                                &[
                                    "Changes are saved on confirm",
                                    "Deleted items can be restored for 7 days",
                                ],
                            ),
                        ],
                    ),
                    feature(
                        "Search",
                        "Find existing items",
                        vec![task(
                            "Search my items",
                            "As a user, I want to search my items so that I can find them quickly",
                            Priority::Medium,
                            "2 days",
                            &[
                                "Search matches titles and descriptions",
                                "Results appear within one second",
                            ],
                        )],
                    ),
                ],
            ),
            epic(
                "Settings & Support",
                "Let users tailor the product and get help",
                vec![feature(
                    "Preferences",
                    "Personalize the experience",
                    vec![task(
                        "Manage notification preferences",
                        "As a user, I want to choose which notifications I receive so that I am not overwhelmed",
                        Priority::Low,
                        "1 day",
                        &[
                            "Each notification type can be toggled",
                            "Changes take effect immediately",
                        ],
                    )],
                )],
            ),
            infrastructure_epic(
                task(
                    "Manage secrets securely",
                    "As a developer, I need credentials kept in a secrets manager so that they never live in source control",
                    Priority::High,
                    "1 day",
                    &[
                        "No secrets are committed to the repository",
                        "Secrets can be rotated without a redeploy",
                    ],
                ),
                task(
                    "Export user data",
                    "As a developer, I need a data export job so that users can download their data on request",
                    Priority::Low,
                    "2 days",
                    &[
                        "Export produces a machine-readable archive",
                        "Export requests are completed within 24 hours",
                    ],
                ),
            ),
        ],
    }
}
