mod test_membership_consistency;
