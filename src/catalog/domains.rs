//! Compiled-in domain table.

use super::{Category, DomainInfo, ResourceTypeInfo};

macro_rules! rt {
    ($name:literal, $desc:literal, $path:literal) => {
        ResourceTypeInfo {
            name: $name,
            description: $desc,
            api_path: $path,
            namespaced: true,
        }
    };
    ($name:literal, $desc:literal, $path:literal, global) => {
        ResourceTypeInfo {
            name: $name,
            description: $desc,
            api_path: $path,
            namespaced: false,
        }
    };
}

pub(super) static DOMAINS: &[DomainInfo] = &[
    DomainInfo {
        name: "load_balancer",
        category: Category::Networking,
        display_name: "Load Balancer",
        description: "HTTP, TCP, UDP load balancing and origin pool management",
        aliases: &["lb"],
        resource_types: &[
            rt!("http_loadbalancer", "HTTP load balancer", "/api/config/namespaces/{namespace}/http_loadbalancers"),
            rt!("tcp_loadbalancer", "TCP load balancer", "/api/config/namespaces/{namespace}/tcp_loadbalancers"),
            rt!("udp_loadbalancer", "UDP load balancer", "/api/config/namespaces/{namespace}/udp_loadbalancers"),
            rt!("origin_pool", "Origin pool of upstream endpoints", "/api/config/namespaces/{namespace}/origin_pools"),
            rt!("healthcheck", "Origin health check", "/api/config/namespaces/{namespace}/healthchecks"),
        ],
    },
    DomainInfo {
        name: "security",
        category: Category::Security,
        display_name: "Security",
        description: "WAF policies, bot defense, service policies, and threat protection",
        aliases: &["sec"],
        resource_types: &[
            rt!("app_firewall", "Web application firewall policy", "/api/config/namespaces/{namespace}/app_firewalls"),
            rt!("service_policy", "Service policy", "/api/config/namespaces/{namespace}/service_policys"),
            rt!("rate_limiter", "Rate limiter", "/api/config/namespaces/{namespace}/rate_limiters"),
            rt!("ip_prefix_set", "IP prefix set", "/api/config/namespaces/{namespace}/ip_prefix_sets"),
        ],
    },
    DomainInfo {
        name: "networking",
        category: Category::Networking,
        display_name: "Networking",
        description: "Networks, DNS zones, routing, BGP, and virtual connectivity",
        aliases: &["net"],
        resource_types: &[
            rt!("virtual_network", "Virtual network", "/api/config/namespaces/{namespace}/virtual_networks"),
            rt!("network_connector", "Network connector", "/api/config/namespaces/{namespace}/network_connectors"),
            rt!("dns_zone", "DNS zone", "/api/config/dns/namespaces/{namespace}/dns_zones"),
            rt!("bgp", "BGP configuration", "/api/config/namespaces/{namespace}/bgps"),
        ],
    },
    DomainInfo {
        name: "infrastructure",
        category: Category::Infrastructure,
        display_name: "Infrastructure",
        description: "Sites, fleets, cloud provisioning, and cluster management",
        aliases: &["infra"],
        resource_types: &[
            rt!("aws_vpc_site", "AWS VPC site", "/api/config/namespaces/{namespace}/aws_vpc_sites"),
            rt!("azure_vnet_site", "Azure VNet site", "/api/config/namespaces/{namespace}/azure_vnet_sites"),
            rt!("fleet", "Site fleet", "/api/config/namespaces/{namespace}/fleets"),
            rt!("cloud_credentials", "Cloud provider credentials", "/api/config/namespaces/{namespace}/cloud_credentialss"),
        ],
    },
    DomainInfo {
        name: "observability",
        category: Category::Operations,
        display_name: "Observability",
        description: "Monitoring, logging, alerts, metrics, and dashboards",
        aliases: &["obs", "o11y"],
        resource_types: &[
            rt!("alert_policy", "Alert policy", "/api/config/namespaces/{namespace}/alert_policys"),
            rt!("alert_receiver", "Alert receiver", "/api/config/namespaces/{namespace}/alert_receivers"),
            rt!("global_log_receiver", "Global log receiver", "/api/config/namespaces/{namespace}/global_log_receivers"),
        ],
    },
    DomainInfo {
        name: "identity",
        category: Category::Platform,
        display_name: "Identity",
        description: "Namespaces, users, roles, authentication, and access control",
        aliases: &["iam"],
        resource_types: &[
            rt!("namespace", "Tenant namespace", "/api/web/namespaces", global),
            rt!("api_credential", "API credential", "/api/web/namespaces/{namespace}/api_credentials"),
            rt!("user", "Tenant user", "/api/web/custom/namespaces/{namespace}/users"),
            rt!("role", "Access role", "/api/web/custom/namespaces/{namespace}/roles"),
        ],
    },
    DomainInfo {
        name: "api_security",
        category: Category::Security,
        display_name: "API Security",
        description: "API discovery, testing, crawling, and endpoint protection",
        aliases: &["apisec"],
        resource_types: &[
            rt!("api_definition", "API definition", "/api/config/namespaces/{namespace}/api_definitions"),
            rt!("api_crawler", "API crawler", "/api/config/namespaces/{namespace}/api_crawlers"),
            rt!("api_discovery", "API discovery", "/api/config/namespaces/{namespace}/api_discoverys"),
        ],
    },
    DomainInfo {
        name: "service_mesh",
        category: Category::Networking,
        display_name: "Service Mesh",
        description: "Service mesh configuration, discovery, and orchestration",
        aliases: &["mesh"],
        resource_types: &[
            rt!("discovery", "Service discovery", "/api/config/namespaces/{namespace}/discoverys"),
            rt!("endpoint", "Service endpoint", "/api/config/namespaces/{namespace}/endpoints"),
            rt!("cluster", "Upstream cluster", "/api/config/namespaces/{namespace}/clusters"),
        ],
    },
    DomainInfo {
        name: "shape_security",
        category: Category::Security,
        display_name: "Shape Security",
        description: "Advanced bot protection, device identification, and client defense",
        aliases: &["shape"],
        resource_types: &[
            rt!("bot_defense_app_infrastructure", "Bot defense application infrastructure", "/api/config/namespaces/{namespace}/bot_defense_app_infrastructures"),
            rt!("protected_application", "Protected application", "/api/config/namespaces/{namespace}/protected_applications"),
        ],
    },
    DomainInfo {
        name: "infrastructure_protection",
        category: Category::Security,
        display_name: "Infrastructure Protection",
        description: "DDoS protection, alerts, events, and mitigation policies",
        aliases: &["infraprot"],
        resource_types: &[
            rt!("infraprotect_asn", "Protected ASN", "/api/config/namespaces/{namespace}/infraprotect_asns"),
            rt!("infraprotect_firewall_rule", "Protection firewall rule", "/api/config/namespaces/{namespace}/infraprotect_firewall_rules"),
        ],
    },
    DomainInfo {
        name: "cdn",
        category: Category::Networking,
        display_name: "CDN",
        description: "Content delivery network, caching, and distribution",
        aliases: &[],
        resource_types: &[
            rt!("cdn_loadbalancer", "CDN distribution", "/api/config/namespaces/{namespace}/cdn_loadbalancers"),
            rt!("cdn_cache_rule", "CDN cache rule", "/api/config/namespaces/{namespace}/cdn_cache_rules"),
            rt!("certificate", "TLS certificate", "/api/config/namespaces/{namespace}/certificates"),
        ],
    },
    DomainInfo {
        name: "operations",
        category: Category::Operations,
        display_name: "Operations",
        description: "Operational tasks, workflows, and system operations",
        aliases: &["ops"],
        resource_types: &[
            rt!("workload", "Virtual Kubernetes workload", "/api/config/namespaces/{namespace}/workloads"),
            rt!("virtual_k8s", "Virtual Kubernetes cluster", "/api/config/namespaces/{namespace}/virtual_k8ss"),
        ],
    },
    DomainInfo {
        name: "tenant_management",
        category: Category::Platform,
        display_name: "Tenant Management",
        description: "Tenant administration, organization management, and governance",
        aliases: &["tenant"],
        resource_types: &[
            rt!("child_tenant", "Child tenant", "/api/web/namespaces/{namespace}/child_tenants"),
            rt!("tenant_profile", "Tenant profile", "/api/web/namespaces/{namespace}/tenant_profiles"),
        ],
    },
    DomainInfo {
        name: "ai_intelligence",
        category: Category::Ai,
        display_name: "AI Intelligence",
        description: "AI and machine learning features and capabilities",
        aliases: &["ai"],
        resource_types: &[
            rt!("ai_assistant_policy", "AI assistant policy", "/api/config/namespaces/{namespace}/ai_assistant_policys"),
        ],
    },
];
